//! End-to-end tests that drive the real TCP prober through the scheduler
//! against listeners on the loopback interface.

use easy_ping::{
    app::App,
    dns::AddressResolver,
    models::Config,
    output::{OutputFormatterFactory, Reporter},
    prober::TcpProber,
    scheduler::{ProbeScheduler, ProbeSettings},
    types::NetworkPreference,
};
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Accepts and immediately closes every connection
async fn spawn_listener() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });
    port
}

/// A port with nothing listening on it
async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

async fn run_for(port: u16, interval: Duration, run_time: Duration) -> (String, easy_ping::ProbeStats) {
    let target = AddressResolver::new(NetworkPreference::Ipv4Only)
        .resolve("127.0.0.1")
        .await
        .unwrap();
    let settings = ProbeSettings {
        timeout: Duration::from_secs(2),
        interval,
    };
    let scheduler = ProbeScheduler::new(target.clone(), settings, Arc::new(TcpProber::new(port)));
    let mut reporter = Reporter::new(OutputFormatterFactory::create_plain_formatter(), target, Vec::new());

    reporter.banner(port).unwrap();
    let stats = scheduler
        .run_until(&mut reporter, tokio::time::sleep(run_time))
        .await
        .unwrap();

    (String::from_utf8(reporter.into_inner()).unwrap(), stats)
}

fn packet_line_regex() -> Regex {
    Regex::new(
        r"^(Reply from 127\.0\.0\.1|Request to 127\.0\.0\.1 failed \((?P<detail>.+)\)): Packets: sent = (?P<sent>\d+), received = (?P<recv>\d+), Lost = (?P<lost>\d+)\((?P<pct>\d+)% loss\), Latency: (?P<lat>\d+\.\d{3}) ms$",
    )
    .unwrap()
}

#[tokio::test]
async fn test_reachable_host_reports_replies() {
    let port = spawn_listener().await;
    let (output, stats) = run_for(port, Duration::from_millis(20), Duration::from_millis(300)).await;

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], format!("Starting to ping 127.0.0.1 (tcp port {})", port));

    let re = packet_line_regex();
    let probe_lines: Vec<&str> = lines[1..].iter().copied().take_while(|l| *l != "Statistics:").collect();
    assert_eq!(probe_lines.len() as u64, stats.sent);
    assert!(stats.sent >= 2, "only {} probes in 300ms", stats.sent);

    for (i, line) in probe_lines.iter().enumerate() {
        let caps = re.captures(line).unwrap_or_else(|| panic!("unexpected line: {}", line));
        assert!(line.starts_with("Reply from"));
        assert_eq!(caps["sent"].parse::<usize>().unwrap(), i + 1);
        assert_eq!(&caps["lost"], "0");
        assert_eq!(&caps["pct"], "0");
    }

    assert_eq!(stats.lost, 0);
    assert!(stats.min_rtt_ms <= stats.mean_rtt_ms && stats.mean_rtt_ms <= stats.max_rtt_ms);

    let summary = Regex::new(
        r"Statistics:\nPackets: sent = \d+, received = \d+, Lost = 0\(0% loss\),\nApproximate round trip times in milli-seconds:\nMinimum: \d+\.\d{3} ms, Maximum: \d+\.\d{3} ms, Average: \d+\.\d{3} ms\n$",
    )
    .unwrap();
    assert!(summary.is_match(&output), "bad summary:\n{}", output);
}

#[tokio::test]
async fn test_refused_connections_count_as_loss() {
    let port = closed_port().await;
    let (output, stats) = run_for(port, Duration::from_millis(20), Duration::from_millis(200)).await;

    assert!(stats.sent >= 1);
    assert_eq!(stats.received, 0);
    assert_eq!(stats.lost, stats.sent);
    assert_eq!(stats.loss_percent(), 100);

    let re = packet_line_regex();
    let failures: Vec<_> = output.lines().filter_map(|l| re.captures(l)).collect();
    assert_eq!(failures.len() as u64, stats.sent);
    for caps in failures {
        assert!(caps.name("detail").is_some());
        assert_eq!(&caps["pct"], "100");
    }
    assert!(output.contains(&format!("Lost = {}(100% loss),\n", stats.sent)));
}

#[tokio::test]
async fn test_listener_going_away_mid_run() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(async move {
        for _ in 0..3 {
            if let Ok((stream, _)) = listener.accept().await {
                drop(stream);
            }
        }
        // Listener dropped here, later connects are refused
    });

    let target = AddressResolver::default().resolve("127.0.0.1").await.unwrap();
    let settings = ProbeSettings {
        timeout: Duration::from_secs(2),
        interval: Duration::from_millis(30),
    };
    let scheduler = ProbeScheduler::new(target.clone(), settings, Arc::new(TcpProber::new(port)));
    let mut reporter = Reporter::new(OutputFormatterFactory::create_plain_formatter(), target, Vec::new());

    let stats = scheduler
        .run_until(&mut reporter, async {
            let _ = server.await;
            tokio::time::sleep(Duration::from_millis(200)).await;
        })
        .await
        .unwrap();

    assert!(stats.received >= 3);
    assert!(stats.lost >= 1);
    assert_eq!(stats.received + stats.lost, stats.sent);
}

#[tokio::test]
async fn test_app_runs_from_config() {
    let port = spawn_listener().await;
    let config = Config {
        host: "[127.0.0.1]".to_string(),
        port,
        interval_ms: 25,
        network: Some("tcp4".to_string()),
        enable_color: false,
        ..Config::default()
    };
    config.validate().unwrap();

    let mut out = Vec::new();
    let stats = App::new(config)
        .run_with(&mut out, tokio::time::sleep(Duration::from_millis(250)))
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    // A literal host prints the bare address in the banner
    assert!(text.starts_with(&format!("Starting to ping 127.0.0.1 (tcp port {})\n", port)));
    assert!(stats.sent >= 1);
    assert!(text.ends_with(&format!(
        "Average: {:.3} ms\n",
        stats.mean_rtt_ms
    )));
}

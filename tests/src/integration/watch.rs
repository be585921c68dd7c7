//! End-to-end: Service events in, reservations out, through the watch
//! bridge.

use super::{harness, service};
use port_claim::{run_service_watch, Protocol, ServiceEvent, ServiceType};
use tokio::sync::mpsc;

#[tokio::test(flavor = "multi_thread")]
async fn watch_bridge_reconciles_a_stream_of_events() {
    let h = harness(&["10.0.0.4"]);
    let (tx, rx) = mpsc::channel(8);
    let bridge = tokio::spawn(run_service_watch(h.manager.clone(), rx));

    for i in 0..4 {
        let svc = service(
            "ns1",
            &format!("svc{i}"),
            ServiceType::NodePort,
            8080,
            30080 + i,
        );
        tx.send(ServiceEvent::Added(svc)).await.expect("send add");
    }
    let gone = service("ns1", "svc0", ServiceType::NodePort, 8080, 30080);
    tx.send(ServiceEvent::Deleted(gone))
        .await
        .expect("send delete");
    drop(tx);

    bridge.await.expect("bridge completes");
    assert_eq!(h.ledger.active_claim_count(), 3);
    assert!(!h.opener.is_bound("", 30080, &Protocol::Tcp));
    assert!(h.opener.is_bound("", 30081, &Protocol::Tcp));
}

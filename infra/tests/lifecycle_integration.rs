//! End-to-end lifecycle test: engine + in-memory storage + ordered
//! dispatcher + queue-backed audit logging.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use sg_core::services::sms::{
    MessageData, SmsConfig, SmsService, SystemClock,
};
use sg_core::PhoneNumber;
use sg_infra::audit::{MemoryAuditStore, QueueAuditLogger};
use sg_infra::gateways::{ErrorlogGateway, MockGateway, OrderedDispatcher};
use sg_infra::storage::MemoryStorage;

fn recipient() -> PhoneNumber {
    PhoneNumber::with_area("13800138000", "86")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_full_pipeline_send_verify_clear() {
    init_tracing();
    let clock = Arc::new(SystemClock);
    let storage = Arc::new(MemoryStorage::new(clock.clone()));
    let gateway = Arc::new(MockGateway::new("primary"));
    let audit_store = MemoryAuditStore::new();
    let audit = Arc::new(QueueAuditLogger::spawn(audit_store.clone(), 64));

    let config = SmsConfig {
        default_gateways: vec!["primary".to_string()],
        debug: true, // read the code back instead of parsing gateway output
        ..Default::default()
    };
    // Debug mode reroutes to errorlog, so register it alongside the real one
    let dispatcher = Arc::new(
        OrderedDispatcher::new()
            .register(gateway.clone())
            .register(Arc::new(ErrorlogGateway)),
    );
    let service = SmsService::new(storage, dispatcher, Some(audit), config, clock);

    // Send
    assert!(service.request_send(&recipient(), MessageData::default(), &[]).await.unwrap());
    assert!(!service.can_send(&recipient()).await.unwrap());

    let code = service.peek_code(&recipient()).await.unwrap().unwrap();
    assert_eq!(code.code.len(), 5);
    assert!(code.sent);

    // Verify: wrong guess, then the real code
    assert!(!service.verify(&recipient(), "wrong").await.unwrap());
    assert!(service.verify(&recipient(), &code.code).await.unwrap());

    // Clear consumes the code for good
    service.clear(&recipient()).await.unwrap();
    assert!(!service.verify(&recipient(), &code.code).await.unwrap());
    assert!(service.can_send(&recipient()).await.unwrap());

    // The audit worker saw the send attempt
    sleep(Duration::from_millis(50)).await;
    let entries = audit_store.entries();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].sent);
    assert_eq!(entries[0].code.full_number(), "+8613800138000");
}

#[tokio::test]
async fn test_full_pipeline_total_gateway_failure() {
    init_tracing();
    let clock = Arc::new(SystemClock);
    let storage = Arc::new(MemoryStorage::new(clock.clone()));
    let dispatcher = Arc::new(
        OrderedDispatcher::new().register(Arc::new(MockGateway::failing("primary"))),
    );
    let audit_store = MemoryAuditStore::new();
    let audit = Arc::new(QueueAuditLogger::spawn(audit_store.clone(), 64));

    let config = SmsConfig {
        default_gateways: vec!["primary".to_string()],
        ..Default::default()
    };
    let service = SmsService::new(storage, dispatcher, Some(audit), config, clock);

    // Dispatch fails but the call itself does not error
    assert!(!service.request_send(&recipient(), MessageData::default(), &[]).await.unwrap());

    // The failure was recorded with the per-gateway diagnostics
    sleep(Duration::from_millis(50)).await;
    let entries = audit_store.entries();
    assert_eq!(entries.len(), 1);
    assert!(!entries[0].sent);
    assert_eq!(entries[0].raw[0]["gateway"], "primary");
}

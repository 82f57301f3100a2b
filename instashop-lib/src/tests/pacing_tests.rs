use super::*;
use instashop_catalog::{CatalogError, KeyPolicy, SessionState, UploadedFile};

fn ingested_session() -> Arc<Mutex<Session>> {
    let mut session = Session::new(KeyPolicy::default());
    session
        .ingest(&[
            UploadedFile::new("shoe.png", "image/png", 10),
            UploadedFile::new("hat.png", "image/png", 10),
        ])
        .unwrap();
    Arc::new(Mutex::new(session))
}

#[tokio::test]
async fn test_request_completes_after_delay() {
    let session = ingested_session();
    let mut pacer = GenerationPacer::new(Arc::clone(&session), Duration::from_millis(20));

    pacer.request().await.unwrap();
    {
        let s = session.lock().await;
        assert_eq!(s.state(), SessionState::Generating);
        assert_eq!(s.ledger().len(), 2);
    }

    assert!(pacer.wait().await.unwrap());
    assert_eq!(session.lock().await.state(), SessionState::Editing);
    assert!(!pacer.is_pending());
}

#[tokio::test]
async fn test_second_request_supersedes_first() {
    let session = ingested_session();
    let mut pacer = GenerationPacer::new(Arc::clone(&session), Duration::from_millis(50));

    let first = pacer.request().await.unwrap();
    let second = pacer.request().await.unwrap();
    assert_ne!(first, second);
    assert_eq!(session.lock().await.pending_generation(), Some(second));

    assert!(pacer.wait().await.unwrap());
    let s = session.lock().await;
    assert_eq!(s.state(), SessionState::Editing);
    assert!(s.pending_generation().is_none());
}

#[tokio::test]
async fn test_cancel_leaves_generating() {
    let session = ingested_session();
    let mut pacer = GenerationPacer::new(Arc::clone(&session), Duration::from_secs(30));

    pacer.request().await.unwrap();
    assert!(pacer.is_pending());
    assert!(pacer.cancel());
    assert!(!pacer.wait().await.unwrap());
    assert_eq!(session.lock().await.state(), SessionState::Generating);
    assert!(!pacer.cancel());
}

#[tokio::test]
async fn test_restart_makes_completion_stale() {
    let session = ingested_session();
    let mut pacer = GenerationPacer::new(Arc::clone(&session), Duration::from_millis(20));

    pacer.request().await.unwrap();
    session.lock().await.restart(true);
    assert!(!pacer.wait().await.unwrap());
    assert_eq!(session.lock().await.state(), SessionState::Idle);
}

#[tokio::test]
async fn test_request_before_ingest_fails() {
    let session = Arc::new(Mutex::new(Session::new(KeyPolicy::default())));
    let mut pacer = GenerationPacer::new(session, Duration::ZERO);
    let err = pacer.request().await.unwrap_err();
    assert!(matches!(
        err,
        LibError::Catalog(CatalogError::InvalidTransition {
            from: SessionState::Idle,
            ..
        })
    ));
    assert!(!pacer.wait().await.unwrap());
}

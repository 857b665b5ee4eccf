//! Optimistic status toggles under a paused clock.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use backoffice_core::error::{Error, ProtocolError};
use backoffice_core::{MutationIntent, RecordStatus, StatusRecord, StatusUpdater};
use backoffice_state::OptimisticList;

#[derive(Debug, Clone, PartialEq)]
struct Row {
    no: u64,
    status: RecordStatus,
    label: String,
}

impl StatusRecord for Row {
    type Id = u64;

    fn record_id(&self) -> u64 {
        self.no
    }

    fn status(&self) -> RecordStatus {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = status;
    }
}

fn row(no: u64, status: RecordStatus) -> Row {
    Row {
        no,
        status,
        label: format!("row {}", no),
    }
}

enum Outcome {
    Accept,
    Canonical(Row),
    Refuse,
}

/// Answers each push with the next scripted outcome after its delay.
#[derive(Clone, Default)]
struct Server {
    script: Arc<Mutex<VecDeque<(u64, Outcome)>>>,
    pushes: Arc<Mutex<Vec<MutationIntent<u64, RecordStatus>>>>,
}

impl Server {
    fn scripted(steps: Vec<(u64, Outcome)>) -> Self {
        Server {
            script: Arc::new(Mutex::new(steps.into())),
            pushes: Arc::default(),
        }
    }

    fn pushes(&self) -> Vec<MutationIntent<u64, RecordStatus>> {
        self.pushes.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusUpdater<Row> for Server {
    async fn push(&self, intent: &MutationIntent<u64, RecordStatus>) -> Result<Option<Row>, Error> {
        self.pushes.lock().unwrap().push(intent.clone());
        let (delay, outcome) = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((0, Outcome::Accept));

        tokio::time::sleep(Duration::from_millis(delay)).await;
        match outcome {
            Outcome::Accept => Ok(None),
            Outcome::Canonical(row) => Ok(Some(row)),
            Outcome::Refuse => Err(ProtocolError::new(
                500,
                Some("SERVER_ERROR".into()),
                Some("status update failed".into()),
            )
            .into()),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn toggle_flips_before_the_server_answers() {
    let server = Server::scripted(vec![(100, Outcome::Accept)]);
    let list = OptimisticList::new(server.clone());
    list.replace_all(vec![row(1, RecordStatus::Active), row(2, RecordStatus::Active)]);

    let task = list.toggle(&1).unwrap();
    let control = list.control(&1).unwrap();
    assert_eq!(control.current_value, RecordStatus::Inactive);
    assert!(control.pending);

    task.await.unwrap().unwrap();
    let control = list.control(&1).unwrap();
    assert_eq!(control.current_value, RecordStatus::Inactive);
    assert!(!control.pending);
    assert_eq!(control.error, None);

    let pushes = server.pushes();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].field, "status");
    assert_eq!(pushes[0].previous_value, RecordStatus::Active);
    assert_eq!(pushes[0].new_value, RecordStatus::Inactive);
    assert_eq!(list.get(&2).unwrap().status, RecordStatus::Active);
}

#[tokio::test(start_paused = true)]
async fn refused_toggle_reverts_and_reports() {
    let server = Server::scripted(vec![(100, Outcome::Refuse)]);
    let list = OptimisticList::new(server);
    list.replace_all(vec![row(1, RecordStatus::Active)]);

    let task = list.toggle(&1).unwrap();
    assert_eq!(list.get(&1).unwrap().status, RecordStatus::Inactive);

    let err = task.await.unwrap().unwrap_err();
    assert!(matches!(err, Error::Protocol(ProtocolError { status: 500, .. })));

    let control = list.control(&1).unwrap();
    assert_eq!(control.current_value, RecordStatus::Active);
    assert!(!control.pending);
    assert!(control.error.unwrap().contains("status update failed"));
}

#[tokio::test(start_paused = true)]
async fn blocked_rows_toggle_to_active() {
    let list = OptimisticList::new(Server::default());
    list.replace_all(vec![row(5, RecordStatus::Blocked)]);

    list.toggle(&5).unwrap().await.unwrap().unwrap();
    assert_eq!(list.get(&5).unwrap().status, RecordStatus::Active);
}

#[tokio::test(start_paused = true)]
async fn server_copy_replaces_local_row() {
    let mut canonical = row(1, RecordStatus::Inactive);
    canonical.label = "renamed on server".to_string();
    let server = Server::scripted(vec![(10, Outcome::Canonical(canonical.clone()))]);
    let list = OptimisticList::new(server);
    list.replace_all(vec![row(1, RecordStatus::Active)]);

    list.toggle(&1).unwrap().await.unwrap().unwrap();
    assert_eq!(list.get(&1).unwrap(), canonical);
}

#[tokio::test(start_paused = true)]
async fn server_copy_is_ignored_while_another_toggle_is_pending() {
    let server = Server::scripted(vec![
        (10, Outcome::Canonical(row(1, RecordStatus::Inactive))),
        (100, Outcome::Accept),
    ]);
    let list = OptimisticList::new(server);
    list.replace_all(vec![row(1, RecordStatus::Active)]);

    let first = list.toggle(&1).unwrap();
    let second = list.toggle(&1).unwrap();
    assert_eq!(list.get(&1).unwrap().status, RecordStatus::Active);

    first.await.unwrap().unwrap();
    assert_eq!(list.get(&1).unwrap().status, RecordStatus::Active);
    assert!(list.control(&1).unwrap().pending);

    second.await.unwrap().unwrap();
    assert_eq!(list.get(&1).unwrap().status, RecordStatus::Active);
}

/// Out-of-order completion with a failure can leave the row on a value the
/// user did not pick last; each toggle only ever restores what it replaced.
#[tokio::test(start_paused = true)]
async fn out_of_order_failure_flickers() {
    let server = Server::scripted(vec![(300, Outcome::Accept), (100, Outcome::Refuse)]);
    let list = OptimisticList::new(server);
    list.replace_all(vec![row(1, RecordStatus::Active)]);

    let first = list.toggle(&1).unwrap();
    let second = list.toggle(&1).unwrap();
    assert_eq!(list.get(&1).unwrap().status, RecordStatus::Active);

    assert!(second.await.unwrap().is_err());
    let control = list.control(&1).unwrap();
    assert_eq!(control.current_value, RecordStatus::Inactive);
    assert!(control.pending);

    first.await.unwrap().unwrap();
    let control = list.control(&1).unwrap();
    assert_eq!(control.current_value, RecordStatus::Inactive);
    assert!(!control.pending);
}

#[tokio::test(start_paused = true)]
async fn unknown_record_is_rejected_without_a_push() {
    let server = Server::default();
    let list = OptimisticList::new(server.clone());
    list.replace_all(vec![row(1, RecordStatus::Active)]);

    let err = list.toggle(&42).unwrap_err();
    assert!(err.is_validation());
    assert!(server.pushes().is_empty());
    assert!(list.control(&42).is_none());
}

#[tokio::test(start_paused = true)]
async fn replace_all_drops_stale_errors() {
    let server = Server::scripted(vec![(0, Outcome::Refuse)]);
    let list = OptimisticList::new(server);
    list.replace_all(vec![row(1, RecordStatus::Active)]);

    assert!(list.toggle(&1).unwrap().await.unwrap().is_err());
    assert!(list.control(&1).unwrap().error.is_some());

    list.replace_all(vec![row(1, RecordStatus::Inactive)]);
    let control = list.control(&1).unwrap();
    assert_eq!(control.current_value, RecordStatus::Inactive);
    assert_eq!(control.error, None);
}

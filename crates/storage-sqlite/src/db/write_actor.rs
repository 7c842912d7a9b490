//! Single-writer actor for serialized database writes.
//!
//! SQLite allows one writer at a time. All mutating queries go through a
//! dedicated actor task that owns one connection and runs each job inside
//! an immediate transaction, so writes never contend for the write lock
//! and each job is atomic.

use std::any::Any;

use diesel::result::Error as DieselError;
use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use paperfolio_core::errors::{Error, Result};

use super::DbPool;
use crate::errors::StorageError;

/// A write job: runs on the actor's connection, inside a transaction.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Queue depth before senders start waiting.
const WRITE_QUEUE_CAPACITY: usize = 1024;

/// Failure inside the transaction wrapper: either the database itself
/// failed, or the job returned a domain error. Both roll the transaction
/// back; domain errors reach the caller with their type intact.
enum JobFailure {
    Query(DieselError),
    Domain(Error),
}

impl From<DieselError> for JobFailure {
    fn from(err: DieselError) -> Self {
        JobFailure::Query(err)
    }
}

impl From<JobFailure> for Error {
    fn from(failure: JobFailure) -> Self {
        match failure {
            JobFailure::Query(e) => StorageError::QueryFailed(e).into(),
            JobFailure::Domain(e) => e,
        }
    }
}

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs inside an immediate transaction: returning `Err` rolls
    /// back every statement the job executed.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |conn| {
                    job(conn).map(|value| Box::new(value) as Box<dyn Any + Send>)
                }),
                reply_tx,
            ))
            .await
            .expect("Writer actor channel closed; the actor task stopped.");

        reply_rx
            .await
            .expect("Writer actor dropped the reply sender without a result.")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("Writer actor returned an unexpected type."))
            })
    }
}

/// Spawns the writer actor on the Tokio runtime.
///
/// The actor holds one pooled connection for its lifetime and processes
/// jobs strictly in order.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(WRITE_QUEUE_CAPACITY);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("Failed to reserve a connection for the writer actor.");

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, JobFailure, _>(|conn| {
                    job(conn).map_err(JobFailure::Domain)
                })
                .map_err(Error::from);

            // The receiver may have gone away; nothing to do then.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}

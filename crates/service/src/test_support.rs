#![cfg(test)]
//! Shared fixtures: a handler over a scripted sock and a caller builder.

use std::io;
use std::sync::{Arc, Mutex};

use models::agent::{Agent, Permission};
use requesthandler::mock::MockSock;
use requesthandler::RequestHandlerClient;
use uuid::Uuid;

use crate::dbhandler::mock::MockDbHandler;
use crate::dbhandler::DbHandler;
use crate::servicehandler::ServiceHandler;

pub type MockClient = RequestHandlerClient<MockSock>;

pub fn agent_with(customer_id: Uuid, permission: Permission) -> Agent {
    Agent { id: Uuid::new_v4(), customer_id, permission, ..Default::default() }
}

/// Handler whose downstream replies come from the returned client's sock.
pub fn handler(db: Arc<dyn DbHandler>) -> (ServiceHandler, Arc<MockClient>) {
    let client = Arc::new(RequestHandlerClient::new(MockSock::default(), "api-manager"));
    (ServiceHandler::new(client.clone(), db), client)
}

pub fn mock_handler() -> (ServiceHandler, Arc<MockClient>) {
    handler(Arc::new(MockDbHandler::default()))
}

/// Collects formatted log lines so tests can assert on what got logged.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Route this thread's events here until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer { self.clone() }
}

use std::time::Duration;

use flume::Sender;
use thiserror::Error;

use crate::model::{
    action::{Action, ActionResult},
    person::{NewPerson, Person},
};

use super::{resolver::ApplyErrors, table::filter::PhoneFilter};

pub enum DatabaseRequestAction {
    Request(Action),
    Shutdown,
}

#[derive(Debug, PartialEq)]
pub enum DatabaseResponseAction {
    Response(ActionResult),
    Rejected(ApplyErrors),
}

pub struct DatabaseRequest {
    pub response_sender: oneshot::Sender<DatabaseResponseAction>,
    pub action: DatabaseRequestAction,
}

#[derive(Error, Debug, PartialEq)]
pub enum RequestManagerError {
    #[error("Database took too long to respond to request")]
    DatabaseTimeout,
    #[error("Database is not running")]
    DatabaseDisconnected,
    #[error(transparent)]
    Rejected(#[from] ApplyErrors),
}

/// Goal of the request manager is to provide a simple interface for interacting with the database
///
/// Every request is sent to the single database thread and answered on its own oneshot channel,
/// the database processes one request at a time so requests never interleave.
///
/// The request manager providers the following APIs
/// 1. Typed operations (count, list, find, add, edit) -- these are completely type safe
/// 2. Generic Action based API -- not type safe because you need to know what Action maps ActionResult
#[derive(Clone)]
pub struct RequestManager {
    database_sender: Sender<DatabaseRequest>,
    request_timeout: Duration,
}

impl RequestManager {
    pub fn new(database_sender: Sender<DatabaseRequest>, request_timeout: Duration) -> Self {
        Self {
            database_sender,
            request_timeout,
        }
    }

    pub fn send_person_count(&self) -> Result<usize, RequestManagerError> {
        let action_result = self.send_single_action(Action::PersonCount)?;
        Ok(action_result.count())
    }

    pub fn send_all_persons(
        &self,
        phone: Option<PhoneFilter>,
    ) -> Result<Vec<Person>, RequestManagerError> {
        let action_result = self.send_single_action(Action::AllPersons(phone))?;
        Ok(action_result.list())
    }

    pub fn send_find_person(&self, name: String) -> Result<Option<Person>, RequestManagerError> {
        let action_result = self.send_single_action(Action::FindPerson(name))?;
        Ok(action_result.get_single())
    }

    pub fn send_add_person(&self, new_person: NewPerson) -> Result<Person, RequestManagerError> {
        let action_result = self.send_single_action(Action::AddPerson(new_person))?;
        Ok(action_result.single())
    }

    pub fn send_edit_person(
        &self,
        name: String,
        phone: String,
    ) -> Result<Option<Person>, RequestManagerError> {
        let action_result = self.send_single_action(Action::EditPerson(name, phone))?;
        Ok(action_result.get_single())
    }

    /// Sends a shutdown request to the database and returns the database's response
    pub fn send_shutdown_request(&self) -> Result<String, RequestManagerError> {
        let action_result = self.send_database_request(DatabaseRequestAction::Shutdown)?;
        Ok(action_result.success_status())
    }

    /// Sends a single action to the database and returns a single action result
    pub fn send_single_action(&self, action: Action) -> Result<ActionResult, RequestManagerError> {
        self.send_database_request(DatabaseRequestAction::Request(action))
    }

    pub fn send_database_request(
        &self,
        database_request: DatabaseRequestAction,
    ) -> Result<ActionResult, RequestManagerError> {
        let (response_sender, response_receiver) = oneshot::channel::<DatabaseResponseAction>();

        let request = DatabaseRequest {
            response_sender,
            action: database_request,
        };

        // Sends the request to the database worker, database will response
        //  on the response_receiver once it's finished processing it's request
        self.database_sender
            .send(request)
            .map_err(|_| RequestManagerError::DatabaseDisconnected)?;

        match response_receiver.recv_timeout(self.request_timeout) {
            Ok(DatabaseResponseAction::Response(action_result)) => Ok(action_result),
            Ok(DatabaseResponseAction::Rejected(err)) => Err(RequestManagerError::Rejected(err)),
            Err(oneshot::RecvTimeoutError::Timeout) => Err(RequestManagerError::DatabaseTimeout),
            Err(oneshot::RecvTimeoutError::Disconnected) => {
                Err(RequestManagerError::DatabaseDisconnected)
            }
        }
    }
}

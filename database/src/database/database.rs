use std::thread;

use flume::Receiver;

use crate::{
    database::request_manager::{DatabaseRequestAction, DatabaseResponseAction},
    model::action::{Action, ActionResult},
};

use super::{
    request_manager::{DatabaseRequest, RequestManager},
    resolver,
    table::table::PersonTable,
};

pub use super::options::DatabaseOptions;

/// Owns the person table. The table is only ever read / written from the database thread,
///  every request is processed to completion before the next one is received.
pub struct Database {
    pub(crate) person_table: PersonTable,
    database_options: DatabaseOptions,
}

impl Database {
    pub fn new(options: DatabaseOptions) -> Self {
        let person_table = match options.seed {
            true => PersonTable::with_seed(),
            false => PersonTable::new(),
        };

        Self {
            person_table,
            database_options: options,
        }
    }

    pub fn new_test() -> Self {
        Database::new(DatabaseOptions::new_test())
    }

    /// Starts the database on its own thread, returns a request manager for talking to it
    pub fn run(self) -> RequestManager {
        let (database_sender, database_receiver) = flume::unbounded::<DatabaseRequest>();

        let request_manager =
            RequestManager::new(database_sender, self.database_options.request_timeout);

        let mut database = self;

        thread::Builder::new()
            .name("database".to_string())
            .spawn(move || database.start(database_receiver))
            .expect("Should be able to spawn the database thread");

        request_manager
    }

    fn start(&mut self, database_receiver: Receiver<DatabaseRequest>) {
        log::info!(
            "📀 Data               [Rows: {}, Seeded: {}]",
            self.person_table.count(),
            self.database_options.seed
        );

        // Process incoming requests from the channel, exits once every sender has been dropped
        while let Ok(DatabaseRequest {
            action,
            response_sender,
        }) = database_receiver.recv()
        {
            let action = match action {
                DatabaseRequestAction::Request(action) => action,
                DatabaseRequestAction::Shutdown => {
                    // Requests sent after the shutdown fail straight away instead of timing out
                    drop(database_receiver);

                    let _ = response_sender.send(DatabaseResponseAction::Response(
                        ActionResult::SuccessStatus("Successfully shutdown database".to_string()),
                    ));

                    return;
                }
            };

            log::info!("Received request: {}", action.log_format());

            let action_response = self.process_action(action);

            // The caller may have timed out and dropped the receiver, that is not our problem
            let _ = response_sender.send(action_response);
        }

        log::info!("All request managers dropped, stopping database");
    }

    pub fn process_action(&mut self, action: Action) -> DatabaseResponseAction {
        let is_mutation = action.is_mutation();

        match resolver::apply(&mut self.person_table, action) {
            Ok(action_result) => {
                if is_mutation {
                    log::info!("✅ Applied: [Rows: {}]", self.person_table.count());
                }

                DatabaseResponseAction::Response(action_result)
            }
            Err(err) => {
                log::warn!("⚠️  Rejected: {:?}", err);

                DatabaseResponseAction::Rejected(err)
            }
        }
    }
}

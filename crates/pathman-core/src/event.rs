//! Activity events collected over a single pathman invocation.
//!
//! Events are held in memory and dumped as JSON at debug level when the
//! session exits, so `--verbose` runs leave a machine-readable trace of
//! what the invocation did and how it finished.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};

use crate::error::{ExitCode, PathmanError};
use crate::session::ActivityKind;

#[derive(Deserialize, Serialize)]
pub struct Event {
    timestamp: u64,
    pub name: String,
    pub event: Kind,
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug)]
pub struct ErrorEnv {
    argv: String,
    exec_path: String,
    path: String,
    platform: String,
    platform_version: String,
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Start,
    End {
        exit_code: i32,
    },
    Error {
        exit_code: i32,
        error: String,
        env: ErrorEnv,
    },
    Args {
        argv: String,
    },
}

impl Kind {
    #[must_use]
    pub fn into_event(self, activity_kind: ActivityKind) -> Event {
        Event {
            timestamp: unix_timestamp(),
            name: activity_kind.to_string(),
            event: self,
        }
    }
}

// returns the current number of milliseconds since the epoch
fn unix_timestamp() -> u64 {
    let start = SystemTime::now();
    let duration = start
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards");
    let nanosecs_since_epoch =
        duration.as_secs() * 1_000_000_000 + u64::from(duration.subsec_nanos());
    nanosecs_since_epoch / 1_000_000
}

fn get_error_env() -> ErrorEnv {
    let path = match env::var("PATH") {
        Ok(p) => p,
        Err(_e) => "error: Unable to get path from environment".to_string(),
    };
    let argv = env::args().collect::<Vec<String>>().join(" ");
    let exec_path = match env::current_exe() {
        Ok(ep) => ep.display().to_string(),
        Err(_e) => "error: Unable to get executable path from environment".to_string(),
    };

    let info = os_info::get();
    let platform = info.os_type().to_string();
    let platform_version = info.version().to_string();

    ErrorEnv {
        argv,
        exec_path,
        path,
        platform,
        platform_version,
    }
}

pub struct Log {
    events: Vec<Event>,
}

impl Log {
    /// Constructs a new event log
    #[must_use]
    pub const fn init() -> Self {
        Self { events: Vec::new() }
    }

    pub fn add_event_start(&mut self, activity_kind: ActivityKind) {
        self.add_event(Kind::Start, activity_kind);
    }
    pub fn add_event_end(&mut self, activity_kind: ActivityKind, exit_code: ExitCode) {
        self.add_event(
            Kind::End {
                exit_code: exit_code as i32,
            },
            activity_kind,
        );
    }
    pub fn add_event_error(&mut self, activity_kind: ActivityKind, error: &PathmanError) {
        self.add_event(
            Kind::Error {
                exit_code: error.exit_code() as i32,
                error: error.to_string(),
                env: get_error_env(),
            },
            activity_kind,
        );
    }
    pub fn add_event_args(&mut self) {
        let argv = env::args_os()
            .enumerate()
            .fold(String::new(), |mut result, (i, arg)| {
                if i > 0 {
                    result.push(' ');
                }
                result.push_str(&arg.to_string_lossy());
                result
            });
        self.add_event(Kind::Args { argv }, ActivityKind::Args);
    }

    fn add_event(&mut self, event_kind: Kind, activity_kind: ActivityKind) {
        let event = event_kind.into_event(activity_kind);
        self.events.push(event);
    }

    /// Dumps the collected events at debug level.
    pub fn publish(&self) {
        if !log_enabled!(Level::Debug) {
            return;
        }
        match serde_json::to_string_pretty(&self.events) {
            Ok(events) => debug!("Event log:\n{events}"),
            Err(e) => debug!("Unable to serialize event log.\n{e}"),
        }
    }
}

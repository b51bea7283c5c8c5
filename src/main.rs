// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod app;
mod catalog;
mod command;
mod error;
mod gate;
mod latency;
mod metadata;
mod navigation;
mod notification;
mod password;
mod rng;
mod session;
mod storage;
mod view;

use std::{path::PathBuf, process, sync::Arc};

use app::{App, SessionStorage};
use async_trait::async_trait;
use catalog::StaticCatalog;
use clap::{Parser, Subcommand};
use error::Result;
use latency::Latency;
use log::{debug, error, info, warn};
use notification::TerminalNotifier;
use session::User;
use storage::IsPersistent as _;
use tokio::{select, task::JoinHandle};

#[derive(Debug, Subcommand)]
enum Command {
    Login(command::auth::Login),
    Signup(command::auth::Signup),
    Logout(command::auth::Logout),
    Whoami(command::auth::Whoami),
    Open(command::browse::Open),
    Dashboard(command::browse::Dashboard),
    Domain(command::browse::Domain),
    Project(command::browse::Project),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, app: &App) -> Result<()> {
        match self {
            Self::Login(cmd) => cmd.execute(app).await,
            Self::Signup(cmd) => cmd.execute(app).await,
            Self::Logout(cmd) => cmd.execute(app).await,
            Self::Whoami(cmd) => cmd.execute(app).await,
            Self::Open(cmd) => cmd.execute(app).await,
            Self::Dashboard(cmd) => cmd.execute(app).await,
            Self::Domain(cmd) => cmd.execute(app).await,
            Self::Project(cmd) => cmd.execute(app).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Where to remember the logged-in account between runs. By default this
    /// is a file in your data directory.
    #[arg(long, env = "IDEABOARD_SESSION_FILE", value_hint = clap::ValueHint::FilePath)]
    session_file: Option<PathBuf>,

    /// Forget the logged-in account as soon as the command finishes.
    #[arg(long)]
    no_persist_session: bool,

    /// Answer straight away instead of simulating network round trips.
    #[arg(long, env = "IDEABOARD_INSTANT")]
    instant: bool,

    #[clap(subcommand)]
    command: Command,
}

fn session_storage(args: &Args) -> SessionStorage {
    if !args.no_persist_session {
        if let Some(ref path) = args.session_file {
            return Box::new(storage::File::at(metadata::SESSION_SLOT, path));
        }

        if let Some(file_storage) = storage::File::new(metadata::SESSION_SLOT) {
            debug!("Remembering sessions in {}", file_storage.path().display());
            return Box::new(file_storage);
        }

        warn!("We need to fall back to in-memory session storage because there is no data directory for this user");
    }

    Box::new(storage::Memory::<User>::new(metadata::SESSION_SLOT))
}

fn watch_progress(app: &App) -> JoinHandle<()> {
    let mut session = app.session().subscribe();
    let mut route = app.navigator().subscribe();
    tokio::spawn(async move {
        loop {
            select! {
                changed = session.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    if session.borrow_and_update().is_loading() {
                        info!("Waiting for the account service to answer");
                    }
                }
                changed = route.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    info!("Now at {}", *route.borrow_and_update());
                }
            }
        }
    })
}

async fn run(args: Args) -> Result<()> {
    let latency = if args.instant {
        Latency::instant()
    } else {
        Latency::default()
    };

    let storage = session_storage(&args);
    if !storage.is_persistent() {
        info!("The session will be forgotten when this command finishes");
    }

    let app = App::new(
        storage,
        Arc::new(StaticCatalog::builtin(latency)?),
        Arc::new(TerminalNotifier),
        latency,
    );
    app.start().await;

    let progress = watch_progress(&app);
    let result = select! {
        result = command::Command::execute(args.command, &app) => result,
        _ = tokio::signal::ctrl_c() => {
            app.unmount();
            Err(error::Error::Cancelled)
        }
    };
    progress.abort();

    info!("Finished at {}", app.navigator().current());
    result
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("IDEABOARD_LOG", "warn")
        .write_style("IDEABOARD_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}

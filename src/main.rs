// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Event Booking command-line client
//!
//! Restores the saved session, checks the route gate of the requested view
//! and runs one action against the booking API.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use event_booking_client::{
    config::Config,
    middleware::GateDecision,
    models::BookingStatus,
    routes::Route,
    views::{AddEventForm, BookingHistoryView},
    App,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "event-booking", author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and save the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "BOOKING_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and save the session
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "BOOKING_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List events
    Events,
    /// Show one event
    Event { id: String },
    /// Book an event
    Book { id: String },
    /// List your bookings
    Bookings,
    /// Cancel a booking
    Cancel { id: String },
    /// Create an event (admins only)
    AddEvent {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// HH:MM, local time
        #[arg(long, default_value = "12:00")]
        time: String,
        #[arg(long, default_value = "")]
        price: String,
    },
    /// Grant yourself admin rights
    MakeAdmin,
}

impl Command {
    /// View whose gate applies to the command.
    fn route(&self) -> Route {
        match self {
            Command::Login { .. } | Command::Logout => Route::Login,
            Command::Register { .. } => Route::Register,
            Command::Whoami | Command::MakeAdmin => Route::Admin,
            Command::Events => Route::Home,
            Command::Event { id } | Command::Book { id } => Route::EventDetail(id.clone()),
            Command::Bookings | Command::Cancel { .. } => Route::Bookings,
            Command::AddEvent { .. } => Route::AddEvent,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let args = Args::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(api_url = %config.api_url, "Starting event booking client");

    let app = App::new(config).context("Failed to initialize client")?;
    app.session.bootstrap().await;

    let route = args.command.route();
    let mut sessions = app.session.subscribe();
    match route.gate().resolve(&mut sessions).await {
        GateDecision::Render => {}
        GateDecision::Redirect(Route::Login) => {
            bail!("Not logged in. Run `event-booking login` first.")
        }
        GateDecision::Redirect(_) => bail!("Admin access required for {}", route),
        GateDecision::Loading => bail!("Session is still loading"),
    }

    run(&app, args.command).await
}

async fn run(app: &App, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let identity = app.session.login(&email, &password).await?;
            println!("Logged in as {}", identity.name);
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            let identity = app.session.register(&name, &email, &password).await?;
            println!("Registered and logged in as {}", identity.name);
        }
        Command::Logout => {
            let next = app.navbar().logout();
            println!("Logged out ({})", next);
        }
        Command::Whoami => {
            if let Some(profile) = app.admin().profile() {
                println!("{} <{}> ({})", profile.name, profile.email, profile.role);
            }
        }
        Command::Events => {
            let mut home = app.home();
            home.load().await;
            if let Some(error) = home.error() {
                bail!("{}", error);
            }
            if let Some(empty) = home.empty_message() {
                println!("{}", empty);
            }
            for card in home.cards() {
                println!(
                    "{}  {}  {}  {}  [{}]",
                    card.id,
                    card.title,
                    card.when,
                    card.price,
                    card.action.label()
                );
            }
        }
        Command::Event { id } => {
            let mut detail = app.event_detail(id);
            detail.load().await;
            if let Some(error) = detail.error() {
                bail!("{}", error);
            }
            if let Some(event) = detail.event() {
                println!("{}\n{}\n{}", event.title, event.description, event.price_label());
                println!("[{}]", detail.action().label());
            }
        }
        Command::Book { id } => {
            let mut detail = app.event_detail(id);
            detail.load().await;
            if let Some(error) = detail.error() {
                bail!("{}", error);
            }
            if detail.is_booked() {
                println!("Already booked");
                return Ok(());
            }
            detail.book().await;
            if let Some(error) = detail.booking_error() {
                bail!("{}", error);
            }
            if let Some(message) = detail.success_message() {
                println!("{}", message);
            }
        }
        Command::Bookings => {
            let mut history = app.booking_history();
            history.load().await;
            if let Some(error) = history.error() {
                bail!("{}", error);
            }
            if history.bookings().is_empty() {
                println!("You haven't booked any events yet.");
            }
            for booking in history.bookings() {
                let title = booking.event.title.as_deref().unwrap_or("(untitled event)");
                let hint = if BookingHistoryView::can_cancel(booking) {
                    "  (cancellable)"
                } else {
                    ""
                };
                println!("{}  {}  {}{}", booking.id, title, booking.status, hint);
            }
        }
        Command::Cancel { id } => {
            let mut history = app.booking_history();
            history.load().await;
            if let Some(error) = history.error() {
                bail!("{}", error);
            }
            match history.booking(&id) {
                None => bail!("No booking {}", id),
                Some(b) if b.status != BookingStatus::Booked => {
                    bail!("Booking {} is {}", id, b.status)
                }
                Some(_) => {}
            }
            history.cancel(&id).await;
            if let Some(error) = history.error() {
                bail!("{}", error);
            }
            println!("Booking {} canceled", id);
        }
        Command::AddEvent {
            title,
            description,
            date,
            time,
            price,
        } => {
            let mut view = app.add_event();
            view.form = AddEventForm {
                title,
                description,
                date,
                time,
                price,
            };
            view.submit().await;
            if let Some(error) = view.error() {
                bail!("{}", error);
            }
            if let Some(message) = view.success_message() {
                println!("{}", message);
            }
        }
        Command::MakeAdmin => {
            let mut admin = app.admin();
            if !admin.show_make_admin() {
                println!("Already an admin");
                return Ok(());
            }
            admin.make_admin().await;
            if let Some(error) = admin.error() {
                bail!("{}", error);
            }
            println!("{}", admin.message().unwrap_or("Done"));
        }
    }

    Ok(())
}

/// Initialize logging to stderr (JSON when `LOG_FORMAT=json`).
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("event_booking_client=info,warn"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

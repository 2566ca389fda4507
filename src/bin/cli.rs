//! CounselHub CLI
//!
//! Terminal front end for the counseling platform:
//! - Log in, register and log out
//! - Browse counselors
//! - List, book and cancel appointments
//! - Start a checkout or fetch a video-call token

use chrono::Local;
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::PathBuf;

use counselhub::client::ApiClient;
use counselhub::config::{generate_default_config, Config};
use counselhub::error::{
    ApiError, BOOKING_FAILED, CANCEL_FAILED, FETCH_APPOINTMENTS_FAILED, FETCH_COUNSELORS_FAILED,
    LOGIN_FAILED, LOGIN_REQUIRED, PAYMENT_FAILED, REGISTRATION_FAILED,
};
use counselhub::models::{Appointment, CheckoutRequest, Role};
use counselhub::pagination::{Pager, APPOINTMENTS_PER_PAGE};
use counselhub::routes::Route;
use counselhub::session::{FileSessionStore, Session, SessionStore};
use counselhub::validation::{
    parse_amount, validate_booking, validate_login, validate_registration, RegistrationForm,
    INVALID_AMOUNT,
};

#[derive(Parser)]
#[command(name = "counselhub")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Book and manage counseling sessions from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account and store the session
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Full name
        #[arg(short, long)]
        name: String,
        /// client or counselor
        #[arg(short, long, default_value = "client")]
        role: Role,
        /// Comma-separated specializations (counselors)
        #[arg(long, default_value = "")]
        specialization: String,
        /// Session rate (counselors)
        #[arg(long, default_value = "")]
        session_rate: String,
        /// Comma-separated preferences (clients)
        #[arg(long, default_value = "")]
        preferences: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the stored session
    Whoami,

    /// List counselors
    Counselors,

    /// List your appointments
    Appointments {
        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Book an appointment with a counselor
    Book {
        /// Counselor id
        counselor: String,
        /// Date and time, YYYY-MM-DDTHH:MM (local time)
        #[arg(short, long)]
        date: String,
        /// Session type
        #[arg(short, long)]
        session_type: String,
    },

    /// Cancel an appointment
    Cancel {
        /// Appointment id
        id: String,
    },

    /// Start a checkout and print the payment page URL
    Pay {
        /// Counselor id
        counselor: String,
        /// Amount (default: the counselor's session rate)
        #[arg(short, long)]
        amount: Option<String>,
    },

    /// Fetch a video-call token for an appointment
    VideoToken {
        /// Appointment id (used as the channel name)
        appointment: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    config.logging.init(&[]);

    let store = FileSessionStore::new(config.session.path());
    let client = ApiClient::new(&config.api)?;
    let json = cli.format == "json";

    match cli.command {
        Commands::Login { email, password } => {
            let password = password_or_stdin(password)?;
            let request = validate_login(&email, &password)?;

            let resp = client
                .login(&request)
                .await
                .unwrap_or_else(|e| fail(&e, LOGIN_FAILED));
            let session = Session::from_auth(resp, None);
            store.save(&session)?;

            println!("Logged in as {} ({})", session.display_name(), session.role);
            println!("Dashboard: {}", session.role.home());
        }

        Commands::Register {
            username,
            email,
            password,
            name,
            role,
            specialization,
            session_rate,
            preferences,
        } => {
            let form = RegistrationForm {
                password: password_or_stdin(password)?,
                username,
                email,
                role,
                name,
                specialization,
                session_rate,
                preferences,
            };
            let request = validate_registration(&form)?;

            let resp = client
                .register(&request)
                .await
                .unwrap_or_else(|e| fail(&e, REGISTRATION_FAILED));
            let session = Session::from_auth(resp, Some(&form.username));
            store.save(&session)?;

            println!("Registered {} ({})", session.display_name(), session.role);
        }

        Commands::Logout => {
            store.clear()?;
            println!("Logged out.");
        }

        Commands::Whoami => match store.load() {
            Some(session) => {
                println!("User:    {}", session.display_name());
                println!("Role:    {}", session.role);
                println!("User ID: {}", session.user_id.as_deref().unwrap_or("-"));
                println!("Session: {:?}", store.path());
            }
            None => println!("Not logged in."),
        },

        Commands::Counselors => {
            let counselors = client
                .counselors()
                .await
                .unwrap_or_else(|e| fail(&e, FETCH_COUNSELORS_FAILED));

            if json {
                println!("{}", serde_json::to_string_pretty(&counselors)?);
            } else if counselors.is_empty() {
                println!("No counselors found.");
            } else {
                println!("{:<26} {:<24} {:<10} {}", "ID", "Name", "Rate", "Specialization");
                println!("{}", "-".repeat(80));

                for c in counselors {
                    println!(
                        "{:<26} {:<24} {:<10} {}",
                        c.id,
                        c.name,
                        c.session_rate
                            .map(|r| r.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        c.specialization_label()
                    );
                }
            }
        }

        Commands::Appointments { page } => {
            let session = require_session(&store);
            let appointments = client
                .appointments_for(&session)
                .await
                .unwrap_or_else(|e| fail(&e, FETCH_APPOINTMENTS_FAILED));

            if json {
                println!("{}", serde_json::to_string_pretty(&appointments)?);
            } else {
                print_appointments(&appointments, page.saturating_sub(1));
            }
        }

        Commands::Book {
            counselor,
            date,
            session_type,
        } => {
            let session = require_session(&store);
            let client_id = session
                .require_user_id()
                .unwrap_or_else(|e| fail(&e, LOGIN_REQUIRED));
            let appointment = validate_booking(
                client_id,
                &counselor,
                &date,
                &session_type,
                Local::now().naive_local(),
            )?;

            client
                .book(&session, &appointment)
                .await
                .unwrap_or_else(|e| fail(&e, BOOKING_FAILED));
            println!("Appointment booked successfully!");
        }

        Commands::Cancel { id } => {
            let session = require_session(&store);
            client
                .cancel(&session, &id)
                .await
                .unwrap_or_else(|e| fail(&e, CANCEL_FAILED));
            println!("Cancelled appointment {}", id);
        }

        Commands::Pay { counselor, amount } => {
            let session = require_session(&store);
            let client_id = session
                .require_user_id()
                .unwrap_or_else(|e| fail(&e, LOGIN_REQUIRED))
                .to_string();

            let amount = match amount {
                Some(raw) => raw,
                None => {
                    let rate = client
                        .counselors()
                        .await
                        .unwrap_or_else(|e| fail(&e, FETCH_COUNSELORS_FAILED))
                        .into_iter()
                        .find(|c| c.id == counselor)
                        .and_then(|c| c.session_rate);
                    match rate {
                        Some(rate) => rate.to_string(),
                        None => {
                            eprintln!("{}", INVALID_AMOUNT);
                            std::process::exit(1);
                        }
                    }
                }
            };
            let amount = parse_amount(&amount)?;

            let url = client
                .checkout(&session, &CheckoutRequest::new(client_id, counselor, amount))
                .await
                .unwrap_or_else(|e| fail(&e, PAYMENT_FAILED));

            println!("Complete your payment at:");
            println!("  {}", url);
        }

        Commands::VideoToken { appointment } => {
            let session = require_session(&store);
            let uid = session
                .require_user_id()
                .unwrap_or_else(|e| fail(&e, LOGIN_REQUIRED));

            let token = client
                .video_token(&appointment, uid)
                .await
                .unwrap_or_else(|e| fail(&e, counselhub::call::CALL_FAILED));

            let details = config.video.join_details(&appointment, uid, token);
            if !details.has_app_id() {
                tracing::warn!("video app id is not configured; set COUNSELHUB_VIDEO_APP_ID");
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&details)?);
            } else {
                println!("App ID:  {}", details.app_id);
                println!("Channel: {}", details.channel_name);
                println!("UID:     {}", details.uid);
                println!("Token:   {}", details.token);
                println!("Web:     {}", Route::video_call(&appointment, uid));
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Print the user-facing message for an API error and exit
fn fail(err: &ApiError, fallback: &str) -> ! {
    tracing::debug!("{}", err);
    eprintln!("{}", err.user_message(fallback));
    if err.is_unauthorized() {
        eprintln!("Your session may have expired; run `counselhub login` again.");
    }
    std::process::exit(1);
}

fn require_session(store: &FileSessionStore) -> Session {
    match store.load() {
        Some(session) => session,
        None => {
            eprintln!("{}", LOGIN_REQUIRED);
            eprintln!("  counselhub login --email you@example.com");
            std::process::exit(1);
        }
    }
}

fn password_or_stdin(password: Option<String>) -> std::io::Result<String> {
    if let Some(p) = password {
        return Ok(p);
    }
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_appointments(appointments: &[Appointment], page: usize) {
    if appointments.is_empty() {
        println!("No appointments found.");
        return;
    }

    let pager = Pager::new(appointments.len(), APPOINTMENTS_PER_PAGE);
    let page = pager.clamp(page);

    println!(
        "{:<26} {:<20} {:<20} {:<20} {}",
        "ID", "Client", "Counselor", "Date/Time", "Session Type"
    );
    println!("{}", "-".repeat(110));

    for appt in pager.slice(appointments, page) {
        println!(
            "{:<26} {:<20} {:<20} {:<20} {}",
            appt.id,
            appt.client_name("Unknown Client"),
            appt.counselor_name("Unknown"),
            appt.display_date(),
            appt.session_type
        );
    }

    if pager.page_count() > 1 {
        println!();
        println!("Page {} of {}", page + 1, pager.page_count());
    }
}

use plan_picker::{api, build_router, build_state_from_env, config, services, AppState};
use plan_picker::handlers::pricing::PRICING_PATH;
use plan_picker::models::{PlanName, SubscriptionOutcome, CATALOG};

use std::net::{SocketAddr, ToSocketAddrs};
use std::process;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use comfy_table::{Table, presets, modifiers, ContentArrangement};
use terminal_size::{Width, terminal_size};

use config::{DEFAULT_HOST, DEFAULT_PORT};

fn load_state(env_file: Option<&str>) -> AppState {
    config::load_env_file(env_file);
    match build_state_from_env() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", yansi::Paint::red("Failed to create HTTP client"), e);
            process::exit(1);
        }
    }
}

/// Reasons `serve` gives up before or while listening
#[derive(Debug, thiserror::Error)]
enum ServeError {
    #[error("Failed to read custom stylesheet at {path}: {source}")]
    Stylesheet { path: String, source: std::io::Error },

    #[error("Cannot resolve listen address {host}:{port}")]
    Address { host: String, port: u16 },

    #[error("Failed to bind to {addr}: {source}")]
    Bind { addr: SocketAddr, source: std::io::Error },

    #[error("Server error: {0}")]
    Runtime(std::io::Error),
}

fn listen_addr(host: &str, port: u16) -> Result<SocketAddr, ServeError> {
    (host, port)
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .ok_or_else(|| ServeError::Address { host: host.to_string(), port })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(%e, "Could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn run_server(mut state: AppState, host: &str, port: u16, stylesheet: Option<String>) -> Result<(), ServeError> {
    if let Some(path) = stylesheet {
        let css = std::fs::read_to_string(&path).map_err(|source| ServeError::Stylesheet { path: path.clone(), source })?;
        tracing::info!(%path, "Loaded custom stylesheet");
        state.custom_css = Some(css);
    }
    if state.shop.is_empty() {
        tracing::warn!("SHOPIFY_SHOP is not configured; every request will be rejected");
    }

    let addr = listen_addr(host, port)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    tracing::info!(%addr, shop = %state.shop, "Pricing server listening");
    println!(
        "{} {}",
        yansi::Paint::new("Pricing page running on").green(),
        yansi::Paint::new(format!("http://{}{}", addr, PRICING_PATH)).cyan()
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServeError::Runtime)
}

async fn serve_or_exit(state: AppState, host: &str, port: u16, stylesheet: Option<String>) {
    if let Err(e) = run_server(state, host, port, stylesheet).await {
        tracing::error!(%e, "Server stopped");
        eprintln!("{}", yansi::Paint::new(&e).red());
        if matches!(e, ServeError::Bind { .. }) {
            eprintln!("{}", yansi::Paint::new("Stop the process using this port or pass a different --port.").yellow());
        }
        process::exit(1);
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn print_catalog(current_plan: Option<&str>) {
    let mut table = new_table();
    table.set_header(vec!["Plan", "Price", "Amount (USD)", "Features", ""]);
    for plan in CATALOG.iter() {
        let marker = match current_plan {
            Some(c) if c == plan.name.as_str() => "current",
            _ if plan.most_popular => "most popular",
            _ => "",
        };
        table.add_row(vec![
            plan.name.as_str().to_string(),
            plan.price_label.to_string(),
            plan.price.to_string(),
            plan.features.join("\n"),
            marker.to_string(),
        ]);
    }
    println!("\n{table}\n");
}

fn require_admin_credentials(state: &AppState) {
    let mut ok = true;
    if state.shop.trim().is_empty() {
        eprintln!("{}", yansi::Paint::new("SHOPIFY_SHOP is not configured").red());
        ok = false;
    }
    if !state.admin.has_access_token() {
        eprintln!("{}", yansi::Paint::new("SHOPIFY_ACCESS_TOKEN is not configured").red());
        ok = false;
    }
    if !ok {
        process::exit(1);
    }
}

#[derive(Parser)]
#[command(
    name = "plan-picker",
    author,
    version,
    about = "Pricing page for an embedded storefront app",
    long_about = r#"plan-picker serves the app's pricing page: it shows the shop's current plan and lets the merchant subscribe to a paid tier through the platform's billing API.

Configuration comes from environment variables (optionally a .env file): SHOPIFY_SHOP, SHOPIFY_ACCESS_TOKEN, SHOPIFY_API_KEY, SHOPIFY_API_SECRET, SHOPIFY_API_VERSION, PUBLIC_BASE_URL.

Examples:
  1) Run the server (dev):
      cargo run -- serve --host 127.0.0.1 --port 8080
  2) Inspect the billing state:
      plan-picker current-plan
      plan-picker subscribe Grow
"#,
    after_help = "Use `plan-picker <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response echo for API commands
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Validate configuration (env vars / API credentials)
    #[command(about = "Validate configuration and ensure API connectivity.", long_about = "Check that the shop, access token and app credentials are set, then query the shop's active subscriptions to confirm the access token works.")]
    CheckConfig { env_file: Option<String> },
    /// List the pricing tiers
    Plans,
    /// Show the shop's current plan
    #[command(about = "Show the shop's current plan", long_about = "Query the active subscriptions of the app installation and print the plan in effect (Basic when there is none).")]
    CurrentPlan,
    /// Create a subscription and print the confirmation URL
    #[command(about = "Subscribe the shop to a plan", long_about = "Create a recurring test-mode subscription for a paid plan and print the URL where the merchant approves the charge.")]
    Subscribe {
        /// Plan name (Grow or Advance)
        plan: String,
        /// Monthly price in USD; defaults to the catalog price
        #[arg(long)]
        price: Option<String>,
        /// Where the merchant lands after approving; defaults to PUBLIC_BASE_URL/app
        #[arg(long)]
        return_url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    // If no command provided, serve the web app by default
    let Some(command) = cli.command else {
        let state = load_state(None);
        serve_or_exit(state, DEFAULT_HOST, DEFAULT_PORT, None).await;
        return;
    };

    // API commands echo their requests unless silenced
    api::set_silent(cli.silent);

    match command {
        Commands::Serve {
            host,
            port,
            env_file,
            stylesheet,
        } => {
            api::set_silent(true);
            let state = load_state(env_file.as_deref());
            serve_or_exit(state, &host, port, stylesheet).await;
        }
        Commands::CheckConfig { env_file } => {
            let state = load_state(env_file.as_deref());
            require_admin_credentials(&state);
            if state.api_key.trim().is_empty() || state.api_secret.trim().is_empty() {
                eprintln!("{}", yansi::Paint::new("SHOPIFY_API_KEY / SHOPIFY_API_SECRET are not configured; session tokens cannot be verified").red());
                process::exit(1);
            }
            match services::load_current_plan(&state.admin).await {
                Ok(plan) => {
                    println!("{} (current plan: {})", yansi::Paint::new("Configuration looks valid").green(), plan);
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Configuration appears invalid").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Plans => {
            print_catalog(None);
        }
        Commands::CurrentPlan => {
            let state = load_state(None);
            require_admin_credentials(&state);
            match services::load_current_plan(&state.admin).await {
                Ok(plan) => {
                    println!("{} {}", yansi::Paint::new("Current plan:").bold(), yansi::Paint::new(&plan).cyan());
                    print_catalog(Some(&plan));
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Failed to load current plan").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Subscribe { plan, price, return_url } => {
            let plan: PlanName = match plan.parse() {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Invalid plan").red(), e);
                    process::exit(1);
                }
            };
            let state = load_state(None);
            require_admin_credentials(&state);
            let price = price.unwrap_or_else(|| plan.plan().price.to_string());
            let return_url = return_url
                .unwrap_or_else(|| plan_picker::utils::return_url(None, &state.public_base_url));
            match services::request_subscription(&state.admin, plan, &price, &return_url).await {
                Ok(SubscriptionOutcome::Confirm { confirmation_url, subscription_id }) => {
                    if let Some(id) = subscription_id {
                        println!("{} {}", yansi::Paint::new("Subscription created:").green(), id);
                    }
                    println!("{} {}", yansi::Paint::new("Approve the charge at").green(), yansi::Paint::new(confirmation_url).underline());
                }
                Ok(SubscriptionOutcome::UserErrors(errors)) => {
                    eprintln!("{}", yansi::Paint::new("The billing API rejected the subscription:").red());
                    for e in errors {
                        let field = e.field_path();
                        if field.is_empty() {
                            eprintln!("  - {}", e.message);
                        } else {
                            eprintln!("  - {}: {}", field, e.message);
                        }
                    }
                    process::exit(1);
                }
                Ok(SubscriptionOutcome::Failed(message)) => {
                    eprintln!("{}", yansi::Paint::new(message).red());
                    process::exit(1);
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Request failed").red(), e);
                    process::exit(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listen_addr_from_ip_and_port() {
        assert_eq!(listen_addr("127.0.0.1", 8080).unwrap(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(listen_addr(DEFAULT_HOST, DEFAULT_PORT).unwrap().port(), DEFAULT_PORT);
    }

    #[test]
    fn serve_errors_name_the_address() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let e = ServeError::Bind {
            addr,
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        assert_eq!(e.to_string(), "Failed to bind to 127.0.0.1:8080: in use");
    }
}

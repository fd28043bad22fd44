use anyhow::{anyhow, bail, Context, Result};
use scripts_client::config::Config;
use scripts_client::routes;
use scripts_client::utils::logging::init_tracing;
use scripts_client::{
    ApiClient, ApiResponse, ScriptService, Session, SessionProvider, SessionStore, UserId,
    UserService,
};
use serde_json::Value;
use std::sync::Arc;

mod table_display;

use table_display::{display_results, display_routes};

const USER_ID_ENV: &str = "SCRIPTS_USER_ID";
const ACCESS_TOKEN_ENV: &str = "SCRIPTS_ACCESS_TOKEN";

fn print_help() {
    println!("scripts-client - command line client for the scripts API");
    println!();
    println!("USAGE:");
    println!("  scripts-client scripts list");
    println!("  scripts-client scripts get <id>");
    println!("  scripts-client scripts create <json>");
    println!("  scripts-client scripts update <id> <json>");
    println!("  scripts-client scripts delete <id>");
    println!("  scripts-client users list");
    println!("  scripts-client users get <id>");
    println!("  scripts-client whoami");
    println!("  scripts-client routes");
    println!("  scripts-client --generate-config");
    println!();
    println!("ENVIRONMENT:");
    println!("  REMOTE_API             Base URL of the remote API (or base_url in config.toml)");
    println!("  {USER_ID_ENV}        Id of the logged-in user");
    println!("  {ACCESS_TOKEN_ENV}   Bearer token of the logged-in user");
    println!("  RUST_LOG               Log filter, e.g. scripts_client=debug or api=debug");
}

/// Session handed over by whatever performed the login.
fn session_from_env() -> Option<Session> {
    let id = std::env::var(USER_ID_ENV).ok()?;
    let token = std::env::var(ACCESS_TOKEN_ENV).ok()?;
    let id: UserId = match id.parse::<i64>() {
        Ok(n) => n.into(),
        Err(_) => id.into(),
    };
    Some(Session::new(id, token))
}

fn require_session(store: &SessionStore) -> Result<Session> {
    store.current_session().ok_or_else(|| {
        anyhow!(
            "Not logged in: set {} and {}",
            USER_ID_ENV,
            ACCESS_TOKEN_ENV
        )
    })
}

fn arg<'a>(args: &'a [String], index: usize, name: &str) -> Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Missing argument <{}>", name))
}

fn parse_json(text: &str) -> Result<Value> {
    serde_json::from_str(text).with_context(|| format!("Invalid JSON body: {}", text))
}

fn generate_config() -> Result<()> {
    let path = Config::get_config_path()?;
    if path.exists() {
        bail!("Config file already exists at {}", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, Config::create_default_with_comments())?;
    println!("Configuration file created at: {}", path.display());
    Ok(())
}

async fn run_scripts(
    scripts: &ScriptService,
    store: &SessionStore,
    args: &[String],
) -> Result<ApiResponse> {
    let user = require_session(store)?;
    let response = match arg(args, 0, "action")? {
        "list" => scripts.list_scripts(&user).await?,
        "get" => scripts.get_script(arg(args, 1, "id")?, &user).await?,
        "create" => {
            let body = parse_json(arg(args, 1, "json")?)?;
            scripts.create_script(&user, &body).await?
        }
        "update" => {
            let id = arg(args, 1, "id")?;
            let body = parse_json(arg(args, 2, "json")?)?;
            scripts.update_script(id, &body, &user).await?
        }
        "delete" => scripts.delete_script(arg(args, 1, "id")?, &user).await?,
        other => bail!("Unknown scripts action '{}'", other),
    };
    Ok(response)
}

async fn run_users(users: &UserService, args: &[String]) -> Result<ApiResponse> {
    let response = match arg(args, 0, "action")? {
        "list" => users.list_users().await?,
        "get" => users.get_user(arg(args, 1, "id")?).await?,
        other => bail!("Unknown users action '{}'", other),
    };
    Ok(response)
}

async fn run(args: &[String]) -> Result<()> {
    let Some(command) = args.first() else {
        print_help();
        return Ok(());
    };

    match command.as_str() {
        "-h" | "--help" | "help" => {
            print_help();
            return Ok(());
        }
        "--generate-config" => return generate_config(),
        "routes" => {
            display_routes(routes::routes());
            return Ok(());
        }
        _ => {}
    }

    let store = match session_from_env() {
        Some(session) => SessionStore::with_session(session),
        None => SessionStore::new(),
    };

    if command == "whoami" {
        match store.current_session() {
            Some(session) => println!("Logged in as user {}", session.id),
            None => println!("Not logged in"),
        }
        return Ok(());
    }

    let base_url = Config::base_url_from_env()?;
    let api = ApiClient::new(&base_url)?;
    scripts_client::trace_command!(args.join(" "));

    let response = match command.as_str() {
        "scripts" => run_scripts(&ScriptService::new(api), &store, &args[1..]).await?,
        "users" => {
            let users = UserService::new(api, Arc::new(store.clone()));
            run_users(&users, &args[1..]).await?
        }
        other => bail!("Unknown command '{}'. Try --help", other),
    };

    display_results(response.body());
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

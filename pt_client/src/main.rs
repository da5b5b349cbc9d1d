//! Command-line client for the tournament records server.
//!
//! Records, lists and deletes tournament results through the HTTP API.

use anyhow::{Context, Result};
use pico_args::Arguments;
use poker_tracker::{Amount, CreateTournamentRequest, Site, Tournament, TournamentId};

use pt_client::api_client::ApiClient;

const DEFAULT_SERVER: &str = "http://localhost:5000";

const HELP: &str = "\
Record poker tournament results

USAGE:
  pt_client [OPTIONS] <COMMAND>

COMMANDS:
  list                  List tournaments, most recent first
  add                   Record a tournament result
  delete ID             Delete a tournament

ADD OPTIONS:
  --name NAME           Tournament name
  --type TYPE           Tournament type, e.g. MTT
  --buy-in AMOUNT       Buy-in
  --prize AMOUNT        Prize won
  --site SITE           Poker site
  --date DATE           Date played (YYYY-MM-DD)
  --itm yes|no          Whether the finish was in the money

OPTIONS:
  --server URL          Server URL  [default: http://localhost:5000]

FLAGS:
  -h, --help            Print help information
";

enum Command {
    List,
    Add(CreateTournamentRequest),
    Delete(TournamentId),
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let server_url = pargs
        .opt_value_from_str("--server")?
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());

    let command = parse_command(&mut pargs)?;

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {:?}", remaining);
    }

    run(ApiClient::new(server_url), command).await
}

fn parse_command(pargs: &mut Arguments) -> Result<Command> {
    match pargs.subcommand()?.as_deref() {
        Some("list") => Ok(Command::List),
        Some("add") => {
            let itm = match pargs.opt_value_from_str::<_, String>("--itm")?.as_deref() {
                None => None,
                Some("yes") => Some(true),
                Some("no") => Some(false),
                Some(other) => anyhow::bail!("--itm must be yes or no, got {other:?}"),
            };
            let amount = |s: String| Amount::from(s.as_str());

            Ok(Command::Add(CreateTournamentRequest {
                name: pargs.opt_value_from_str("--name")?,
                tournament_type: pargs.opt_value_from_str("--type")?,
                buy_in: pargs.opt_value_from_str::<_, String>("--buy-in")?.map(amount),
                prize: pargs.opt_value_from_str::<_, String>("--prize")?.map(amount),
                itm,
                site: pargs.opt_value_from_str("--site")?,
                date: pargs.opt_value_from_str("--date")?,
            }))
        }
        Some("delete") => {
            let id = pargs
                .free_from_str()
                .context("delete needs a numeric tournament ID")?;
            Ok(Command::Delete(id))
        }
        Some(other) => anyhow::bail!("Unknown command {other:?}, see --help"),
        None => anyhow::bail!("No command given, see --help"),
    }
}

async fn run(client: ApiClient, command: Command) -> Result<()> {
    match command {
        Command::List => {
            let tournaments = client.list_tournaments().await?;
            if tournaments.is_empty() {
                println!("No tournaments recorded.");
                return Ok(());
            }

            print_header();
            for tournament in &tournaments {
                print_row(tournament);
            }

            let buy_ins: f64 = tournaments.iter().map(|t| t.buy_in).sum();
            let prizes: f64 = tournaments.iter().map(|t| t.prize).sum();
            println!(
                "\n{} tournaments, buy-ins {:.2}, prizes {:.2}, net {:.2}",
                tournaments.len(),
                buy_ins,
                prizes,
                prizes - buy_ins
            );
        }
        Command::Add(request) => {
            if let Some(site) = request.site.as_deref()
                && site.parse::<Site>().is_err()
            {
                let known: Vec<&str> = Site::ALL.iter().map(Site::as_str).collect();
                eprintln!("Warning: {site:?} is not one of {}", known.join(", "));
            }

            let tournament = client.create_tournament(&request).await?;
            println!("Recorded tournament {}", tournament.id);
            print_header();
            print_row(&tournament);
        }
        Command::Delete(id) => {
            let tournament = client.delete_tournament(id).await?;
            println!("Deleted tournament {}", tournament.id);
            print_header();
            print_row(&tournament);
        }
    }

    Ok(())
}

fn print_header() {
    println!(
        "{:>6}  {:<10}  {:<28}  {:<8}  {:<11}  {:>10}  {:>10}  {:<3}",
        "ID", "DATE", "NAME", "TYPE", "SITE", "BUY-IN", "PRIZE", "ITM"
    );
}

fn print_row(t: &Tournament) {
    let itm = match t.itm {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    };
    println!(
        "{:>6}  {:<10}  {:<28}  {:<8}  {:<11}  {:>10.2}  {:>10.2}  {:<3}",
        t.id,
        t.date.to_string(),
        t.name,
        t.tournament_type,
        t.site,
        t.buy_in,
        t.prize,
        itm
    );
}

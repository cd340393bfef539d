//! # ftb
//!
//! Command-line front end for the futu bridge metadata core.
//!
//! Translates identities and enumerations, inspects the metadata cache, and
//! imports a contract directory fetched by the brokerage session into the
//! snapshot and attribute stores.
//!
//! # Usage
//!
//! ```bash
//! ftb to-vendor 00700.SEHK AAPL.US
//! ftb info 00700.SEHK
//! ftb snapshot import --date 2024-01-02 --from contracts.json
//! ftb --config ftb.json settings --dev-defaults
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use ftb_cache::MetadataCache;
use ftb_core::config::{AppConfig, MissingSettings, load_config, load_connect_settings};
use ftb_core::logging::{LogFormat, init_logging};
use ftb_core::{ContractRecord, EnumMember, EnumTranslator, Exchange, ScreenerField, SymbolTranslator};
use tracing::info;

/// Futu bridge metadata tool.
#[derive(Parser)]
#[command(name = "ftb", about = "Futu bridge symbol translation and metadata cache")]
struct Cli {
    /// Configuration file path (JSON). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Metadata root, overriding config and the `.trader` lookup.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,

    /// Log file format (text, json).
    #[arg(long, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Canonical identities (`700.SEHK`) to vendor codes (`HK.700`).
    ToVendor { identities: Vec<String> },

    /// Vendor codes (`HK.700`) to canonical identities (`700.SEHK`).
    ToCanonical { codes: Vec<String> },

    /// Translate one canonical enumeration member to its vendor member.
    Enum { family: Family, member: String },

    /// Basic info and contract record of one identity.
    Info { identity: String },

    /// Identities listed in the trading-info table.
    Selected {
        /// Drop entries flagged `exclude`.
        #[arg(long)]
        check_exclude: bool,

        /// Print vendor codes instead of canonical identities.
        #[arg(long)]
        vendor: bool,
    },

    /// Inspect or import contract snapshots.
    #[command(subcommand)]
    Snapshot(SnapshotCommand),

    /// Show the brokerage connection settings.
    Settings {
        /// Fall back to a local simulated gateway when no settings file exists.
        #[arg(long)]
        dev_defaults: bool,
    },
}

#[derive(Subcommand)]
enum SnapshotCommand {
    /// Summarize the snapshot for a date (default today).
    Show {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Store a JSON array of contract records as the snapshot for a date,
    /// and refresh the basic-info and contracts tables from it.
    Import {
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long = "from")]
        from: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Family {
    Exchange,
    KlType,
    Quarter,
    Position,
    Field,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = init_logging(&cli.log_level, cli.log_dir.as_deref(), "ftb", cli.log_format);

    let mut config = match &cli.config {
        Some(path) => load_config(path).with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::default(),
    };
    if let Some(root) = cli.root {
        config.metadata.root = Some(root);
    }

    match cli.command {
        Command::ToVendor { identities } => {
            let translator = SymbolTranslator::new()?;
            for code in translator.identities_to_vendor_codes(&identities)? {
                println!("{code}");
            }
        }
        Command::ToCanonical { codes } => {
            let translator = SymbolTranslator::new()?;
            for identity in translator.vendor_codes_to_identities(&codes)? {
                println!("{identity}");
            }
        }
        Command::Enum { family, member } => {
            println!("{}", translate_enum(&EnumTranslator::new()?, family, &member)?);
        }
        Command::Info { identity } => {
            let mut cache = MetadataCache::open(&config.metadata)?;
            let out = serde_json::json!({
                "identity": identity,
                "vendor_code": cache.translator().identity_to_vendor_code(&identity)?,
                "basic_info": cache.stock_basic_info(&identity)?,
                "contract": cache.contract_info(&identity)?,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Selected { check_exclude, vendor } => {
            let cache = MetadataCache::open(&config.metadata)?;
            let list = if vendor {
                cache.selected_vendor_codes(check_exclude)?
            } else {
                cache.selected_identities(check_exclude)?
            };
            for item in list {
                println!("{item}");
            }
        }
        Command::Snapshot(SnapshotCommand::Show { date }) => {
            let mut cache = MetadataCache::open(&config.metadata)?;
            let date = date.unwrap_or_else(today);
            let (snapshot, key) = cache.load_snapshot(date)?;
            match snapshot {
                Some(snapshot) => {
                    println!("{key}: {} contract(s)", snapshot.len());
                    for (identity, record) in &snapshot.records {
                        println!("  {identity}\t{}\ttick={}\tsize={}", record.name, record.pricetick, record.size);
                    }
                }
                None => println!("{key}: no snapshot"),
            }
        }
        Command::Snapshot(SnapshotCommand::Import { date, from }) => {
            let content =
                std::fs::read_to_string(&from).with_context(|| format!("reading {}", from.display()))?;
            let records: Vec<ContractRecord> =
                serde_json::from_str(&content).with_context(|| format!("parsing {}", from.display()))?;
            if records.is_empty() {
                bail!("{} holds no contract records", from.display());
            }

            let mut cache = MetadataCache::open(&config.metadata)?;
            let date = date.unwrap_or_else(today);
            let basic = cache.store_basic_info(&records)?;
            let contracts = cache.store_contracts_info(&records)?;
            let key = cache.store_snapshot(date, records)?;
            info!("imported {contracts} contract(s), {basic} basic-info row(s) as {key}");
            println!("{key}");
        }
        Command::Settings { dev_defaults } => {
            let cache = MetadataCache::open(&config.metadata)?;
            let policy = if dev_defaults {
                MissingSettings::DevelopmentDefaults
            } else {
                config.metadata.missing_settings
            };
            let path = cache.root().file(&config.metadata.connect_settings_file);
            let mut settings = load_connect_settings(&path, policy, &cache.root().snapshot_dir())?;
            settings.password = "******".to_string();
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn translate_enum(enums: &EnumTranslator, family: Family, member: &str) -> Result<String> {
    let unknown = || anyhow::anyhow!("unknown member {member:?}");
    Ok(match family {
        Family::Exchange => {
            let market = enums.exchange_to_market(Exchange::from_name(member).ok_or_else(unknown)?)?;
            format!("{} (qot_market={})", market.name(), market.qot_market())
        }
        Family::KlType => {
            let kl = ftb_core::KlType::from_name(member).ok_or_else(unknown)?;
            enums.kl_type_to_vendor(kl)?.name().to_string()
        }
        Family::Quarter => {
            let q = ftb_core::FinancialQuarter::from_name(member).ok_or_else(unknown)?;
            enums.financial_quarter_to_vendor(q)?.name().to_string()
        }
        Family::Position => {
            let p = ftb_core::RelativePosition::from_name(member).ok_or_else(unknown)?;
            enums.relative_position_to_vendor(p)?.name().to_string()
        }
        Family::Field => {
            let field = ScreenerField::from_name(member).ok_or_else(unknown)?;
            enums.stock_field_to_vendor(field)?.name().to_string()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_members_translate_by_name() {
        let enums = EnumTranslator::new().unwrap();
        assert_eq!(translate_enum(&enums, Family::KlType, "K_DAY").unwrap(), "K_DAY");
        assert_eq!(translate_enum(&enums, Family::Exchange, "SEHK").unwrap(), "HK (qot_market=1)");
        assert!(translate_enum(&enums, Family::Quarter, "Q5").is_err());
    }

    #[test]
    fn cli_parses_snapshot_import() {
        let cli = Cli::try_parse_from(["ftb", "snapshot", "import", "--date", "2024-01-02", "--from", "c.json"])
            .unwrap();
        match cli.command {
            Command::Snapshot(SnapshotCommand::Import { date, from }) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 2));
                assert_eq!(from, PathBuf::from("c.json"));
            }
            _ => panic!("wrong subcommand"),
        }
    }
}

use anyhow::{bail, Context};
use bluenumbers::gap::AdPacket;
use bluenumbers::{Category, Config, Registry};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Bluetooth SIG assigned numbers")]
#[command(
    long_about = "Look up the assigned numbers of the Bluetooth SIG and decode advertising data. \
    The numbers are read from a local clone of the Bluetooth SIG's public repository, which is \
    created the first time it is needed."
)]
struct Cli {
    /// Increase the verbosity of the log (may be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// The directory of the local clone
    #[arg(long, global = true, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// The URL of the repository to clone
    #[arg(long, global = true, value_name = "URL")]
    repo_url: Option<String>,

    /// The git program
    #[arg(long, global = true, value_name = "PATH")]
    git: Option<PathBuf>,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone the repository if there is no local clone
    Sync,
    /// Pull the latest revision of the repository
    Update,
    /// Look up a UUID by its 16 bit value or by its identifier
    ///
    /// The value may be decimal or hexadecimal with the prefix `0x`. Anything that is not a number
    /// is looked up as an identifier, for example `org.bluetooth.service.battery_service`.
    Uuid { key: String },
    /// Look up a company identifier
    Company {
        #[arg(value_parser = parse_number::<u16>)]
        value: u16,
    },
    /// Look up an AD type
    AdType {
        #[arg(value_parser = parse_number::<u8>)]
        value: u8,
    },
    /// Decode advertising data given as hexadecimal
    Decode { data: String },
    /// Write every table as JSON into a directory
    Export { out: PathBuf },
}

fn parse_number<T: TryFrom<u64>>(s: &str) -> Result<T, String> {
    let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    }
    .map_err(|e| e.to_string())?;

    T::try_from(value).map_err(|_| format!("{} is out of range", s))
}

fn init_logger(verbose: u8) -> anyhow::Result<()> {
    use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("failed to initialize the logger")
}

fn print<T: Serialize + std::fmt::Display>(json: bool, value: &T) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", value);
    }

    Ok(())
}

/// Text output of the records
struct Text<'a, T>(&'a T);

impl<T: Serialize> Serialize for Text<'_, T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl std::fmt::Display for Text<'_, bluenumbers::AssignedUuid> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:#06x} {} [{}]", self.0.short_uuid, self.0.name, self.0.category)?;

        if let Some(id) = &self.0.id {
            write!(f, "\nid:   {}", id)?;
        }

        write!(f, "\nuuid: {}", self.0.full_uuid())
    }
}

impl std::fmt::Display for Text<'_, bluenumbers::CompanyIdentifier> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:#06x} {}", self.0.value, self.0.name)
    }
}

impl std::fmt::Display for Text<'_, bluenumbers::AdTypeInfo> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:#04x} {}", self.0.value, self.0.name)?;

        if !self.0.reference.is_empty() {
            write!(f, "\n{}", self.0.reference)?;
        }

        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logger(cli.verbose)?;

    let mut config = Config::from_env();

    if let Some(dir) = cli.dir {
        config = config.with_snapshot_dir(dir);
    }

    if let Some(url) = cli.repo_url {
        config = config.with_repo_url(url);
    }

    if let Some(git) = cli.git {
        config = config.with_git(git);
    }

    log::debug!("using {:?}", config);

    let registry = Registry::from_config(config);

    match cli.command {
        Commands::Sync => {
            for category in Category::ALL {
                registry
                    .load(category)
                    .with_context(|| format!("failed to load the {} table", category))?;
            }

            match registry.revision()? {
                Some(revision) => println!("{} at revision {}", registry.snapshot_dir().display(), revision),
                None => println!("{}", registry.snapshot_dir().display()),
            }
        }
        Commands::Update => {
            let status = registry.update().context("failed to update the registry")?;

            if status.changed() {
                println!("updated to revision {}", registry.revision()?.map(|r| r.to_string()).unwrap_or_default());
            } else {
                println!("already up to date");
            }
        }
        Commands::Uuid { key } => {
            let found = match parse_number::<u16>(&key) {
                Ok(short_uuid) => registry.get_uuid(short_uuid)?,
                Err(_) => registry.get_uuid_by_id(&key)?,
            };

            match found {
                Some(uuid) => print(cli.json, &Text(&uuid))?,
                None => bail!("no assigned UUID for `{}`", key),
            }
        }
        Commands::Company { value } => match registry.get_company_identifier(value)? {
            Some(company) => print(cli.json, &Text(&company))?,
            None => bail!("no company identifier {:#06x}", value),
        },
        Commands::AdType { value } => match registry.get_ad_type(value)? {
            Some(ad_type) => print(cli.json, &Text(&ad_type))?,
            None => bail!("no AD type {:#04x}", value),
        },
        Commands::Decode { data } => {
            let cleaned: String = data.chars().filter(|c| !c.is_whitespace() && *c != ':').collect();

            let raw = hex::decode(cleaned.trim_start_matches("0x")).context("advertising data is not hexadecimal")?;

            let packet = AdPacket::try_from_bytes(&raw).context("malformed advertising data")?;

            let description = bluenumbers::describe::describe(&registry, &packet)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&description)?);
            } else {
                print!("{}", description);
            }
        }
        Commands::Export { out } => {
            for path in registry.export_json(&out)? {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

use anyhow::Context;
use clap::{Parser, Subcommand};
use concierge_app::{
    modules::customers::directory::{HotelDirectory, HotelLookup, HttpHotelDirectory},
    service::{shutdown_signal, Service},
};
use concierge_kernel::{ServiceKind, Settings};

#[derive(Debug, Parser)]
#[command(name = "concierge", version, about = "Run and check the Concierge services")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve one service until ctrl-c
    Serve {
        /// `customer` or `hotel`
        service: ServiceKind,
        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Ask the configured hotel service whether a hotel exists
    CheckHotel {
        hotel_id: String,
        /// Override the configured hotel service base url
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load Concierge settings")?;
    concierge_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve { service, port } => {
            if let Some(port) = port {
                match service {
                    ServiceKind::Customer => settings.customer_service.port = port,
                    ServiceKind::Hotel => settings.hotel_service.port = port,
                }
            }
            tracing::info!(env = ?settings.environment, %service, "serving");
            Service::from_settings(service, &settings)?
                .run(&settings, shutdown_signal())
                .await
        }
        Command::CheckHotel { hotel_id, base_url } => {
            if let Some(base_url) = base_url {
                settings.hotel_directory.base_url = base_url;
            }
            let directory = HttpHotelDirectory::new(&settings.hotel_directory)?;
            match directory.lookup(&hotel_id).await? {
                HotelLookup::Found => println!("hotel {hotel_id} exists"),
                HotelLookup::Missing { status } => {
                    anyhow::bail!("hotel {hotel_id} not found (status {status})")
                }
            }
            Ok(())
        }
    }
}

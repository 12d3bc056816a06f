use clap::{Parser, Subcommand};
use env_logger::Env;

use trip_planner_api::client::explore::suggest_destination;
use trip_planner_api::client::history::LocalStorage;
use trip_planner_api::client::render::render;
use trip_planner_api::client::request::ItineraryClient;
use trip_planner_api::client::{ClientError, TripPlanner};
use trip_planner_api::models::trip::{Budget, GenerateTripRequest, SaveTripRequest};

#[derive(Parser)]
#[command(name = "trip-cli", about = "Plan trips against a trip-planner-api backend")]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "TRIP_SERVER_URL", default_value = "http://localhost:5000")]
    server: String,

    /// Directory holding the local trip history
    #[arg(long, env = "TRIP_STORAGE_DIR", default_value = ".trip-planner")]
    storage_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate an itinerary and print it
    Plan {
        #[arg(long)]
        destination: String,
        #[arg(long, default_value_t = 3)]
        days: u32,
        /// Cheap, Moderate or Luxury
        #[arg(long, default_value = "Moderate")]
        budget: String,
        #[arg(long, default_value = "")]
        interests: String,
        /// Also store the trip on the backend
        #[arg(long)]
        save: bool,
    },
    /// Suggest a destination to try
    Explore,
    /// List recently generated trips
    History,
    /// Print a trip from the history (0 is the newest)
    Load { index: usize },
}

#[tokio::main]
async fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("warn"));
    let cli = Cli::parse();

    let planner = TripPlanner::new(
        ItineraryClient::new(&cli.server),
        LocalStorage::new(&cli.storage_dir),
    );

    if let Err(e) = run(cli.command, &planner).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command, planner: &TripPlanner) -> Result<(), ClientError> {
    match command {
        Command::Plan {
            destination,
            days,
            budget,
            interests,
            save,
        } => {
            let budget = Budget::from(budget);
            let request = GenerateTripRequest {
                destination: Some(destination.clone()),
                days: Some(days),
                budget: Some(budget),
                interests: Some(interests.clone()),
            };

            let itinerary = planner.submit(&request).await?;
            print!("{}", render(&itinerary));

            if save {
                let save_request = SaveTripRequest {
                    destination,
                    days: Some(days),
                    budget,
                    interests,
                    generated_content: itinerary,
                };
                match planner.client().save(&save_request).await {
                    Ok(id) => println!("\nSaved as {}", id),
                    Err(_) => eprintln!("\nFailed to save trip"),
                }
            }
        }
        Command::Explore => {
            let suggestion = suggest_destination();
            println!("{} ({})", suggestion.destination, suggestion.interests);
        }
        Command::History => {
            let history = planner.history();
            if history.is_empty() {
                println!("No trips saved yet. Generate a trip to see it here.");
            }
            for (i, trip) in history.iter().enumerate() {
                println!(
                    "{:>2}. {} | {} | {}",
                    i,
                    trip.trip_details.destination,
                    trip.trip_details.duration,
                    trip.trip_details.budget
                );
            }
        }
        Command::Load { index } => {
            let itinerary = planner.load_from_history(index)?;
            print!("{}", render(&itinerary));
        }
    }
    Ok(())
}

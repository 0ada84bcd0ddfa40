//! EcoCycle Database Seeder
//!
//! Seeds a running EcoCycle API with the demo exchange: ten industries, the
//! wastes they list and a few requests. Everything goes through the HTTP API,
//! so approvals decrement stock exactly as they would for a real user.
//!
//! Usage:
//!   `cargo run --bin seed_database -- --url http://localhost:5555`

use clap::{Arg, ArgAction, Command};
use console::style;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, Method};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;

type SeedResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Clone)]
pub struct SeedingConfig {
    pub base_url: String,
    pub client: Client,
}

#[derive(Debug, Default)]
pub struct CreatedObjects {
    /// Keyed by industry_code
    pub industries: HashMap<i64, Value>,
    pub wastes: Vec<Value>,
    pub requests: Vec<Value>,
}

pub struct DatabaseSeeder {
    config: SeedingConfig,
    created_objects: CreatedObjects,
}

struct RequestSeed {
    requester_code: i64,
    waste_index: usize,
    quantity_requested: f64,
    details: &'static str,
    outcome: Option<&'static str>,
}

fn progress_bar(len: usize) -> SeedResult<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>7}/{len:7} {msg}")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

impl DatabaseSeeder {
    pub fn new(base_url: &str) -> SeedResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            config: SeedingConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                client,
            },
            created_objects: CreatedObjects::default(),
        })
    }

    async fn make_request(
        config: &SeedingConfig,
        method: Method,
        endpoint: &str,
        data: Option<&Value>,
    ) -> SeedResult<Value> {
        let url = format!("{}{}", config.base_url, endpoint);
        let mut request = config.client.request(method, &url);
        if let Some(json_data) = data {
            request = request.json(json_data);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<Value>().await?)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(format!("HTTP {status} {endpoint}: {error_text}").into())
        }
    }

    pub async fn test_connection(&self) -> SeedResult<()> {
        let health = Self::make_request(&self.config, Method::GET, "/api/health", None).await?;
        println!(
            "{} API reachable: {}",
            style("✔").green(),
            health["message"].as_str().unwrap_or("ok")
        );
        Ok(())
    }

    /// Deletes every industry; wastes and requests go with them
    pub async fn clear_existing(&self) -> SeedResult<()> {
        println!("{} Clearing existing data...", style("[1/4]").bold().dim());

        let existing = Self::make_request(&self.config, Method::GET, "/api/industries", None).await?;
        let ids: Vec<i64> = existing
            .as_array()
            .map(|industries| industries.iter().filter_map(|i| i["id"].as_i64()).collect())
            .unwrap_or_default();

        let pb = progress_bar(ids.len())?;
        for id in &ids {
            Self::make_request(&self.config, Method::DELETE, &format!("/api/industries/{id}"), None)
                .await?;
            pb.inc(1);
        }
        pb.finish_with_message("Cleared!");
        println!("{} Removed {} industries", style("✔").green(), ids.len());

        Ok(())
    }

    pub async fn create_industries(&mut self) -> SeedResult<()> {
        println!("{} Creating industries...", style("[2/4]").bold().dim());

        let industries_data = vec![
            json!({"name": "EcoSteel Ltd", "industry_code": 101, "description": "Steel manufacturing"}),
            json!({"name": "GreenPlast", "industry_code": 102, "description": "Plastic processing"}),
            json!({"name": "RecyclePro", "industry_code": 103, "description": "Recycling services"}),
            json!({"name": "BioLoop", "industry_code": 104, "description": "Organic waste recycling"}),
            json!({"name": "UniCycle", "industry_code": 105, "description": "Circular economy solutions"}),
            json!({"name": "GlassWorks KE", "industry_code": 106, "description": "Glass manufacturing"}),
            json!({"name": "MetalCore", "industry_code": 107, "description": "Metal fabrication"}),
            json!({"name": "WasteXchange", "industry_code": 108, "description": "Waste trading platform"}),
            json!({"name": "AgriCycle", "industry_code": 109, "description": "Agricultural waste reuse"}),
            json!({"name": "EcoRenew", "industry_code": 110, "description": "Renewable material recovery"}),
        ];

        let pb = progress_bar(industries_data.len())?;
        pb.set_message("Creating industries in parallel");

        let config = &self.config;
        let tasks = industries_data.iter().map(|industry| {
            let pb = pb.clone();
            async move {
                let result =
                    Self::make_request(config, Method::POST, "/api/industries", Some(industry)).await;
                pb.inc(1);
                result
            }
        });

        for result in join_all(tasks).await {
            let industry = result?;
            let code = industry["industry_code"]
                .as_i64()
                .ok_or("industry_code missing from response")?;
            self.created_objects.industries.insert(code, industry);
        }

        pb.finish_with_message("Industries created!");
        println!(
            "{} Created {} industries",
            style("✔").green(),
            self.created_objects.industries.len()
        );

        Ok(())
    }

    fn industry_id(&self, code: i64) -> SeedResult<i64> {
        self.created_objects
            .industries
            .get(&code)
            .and_then(|industry| industry["id"].as_i64())
            .ok_or_else(|| format!("Industry with code {code} was not created").into())
    }

    pub async fn create_wastes(&mut self) -> SeedResult<()> {
        println!("{} Listing wastes...", style("[3/4]").bold().dim());

        let wastes_data = [
            ("Scrap Metal", "Metal", 500.0, 101),
            ("Plastic Pellets", "Plastic", 300.0, 102),
            ("Glass Shards", "Glass", 200.0, 106),
            ("Organic Waste", "Organic", 1000.0, 104),
            ("Aluminium Offcuts", "Metal", 150.0, 107),
        ];

        let pb = progress_bar(wastes_data.len())?;
        for (name, waste_type, quantity, owner_code) in wastes_data {
            pb.set_message(format!("Listing: {name}"));
            let payload = json!({
                "name": name,
                "waste_type": waste_type,
                "quantity": quantity,
                "unit": "kg",
                "industry_id": self.industry_id(owner_code)?
            });
            let waste = Self::make_request(&self.config, Method::POST, "/api/wastes", Some(&payload)).await?;
            self.created_objects.wastes.push(waste);
            pb.inc(1);
        }

        pb.finish_with_message("Wastes listed!");
        println!(
            "{} Listed {} wastes",
            style("✔").green(),
            self.created_objects.wastes.len()
        );

        Ok(())
    }

    pub async fn create_requests(&mut self) -> SeedResult<()> {
        println!("{} Filing waste requests...", style("[4/4]").bold().dim());

        let requests_data = [
            RequestSeed {
                requester_code: 103,
                waste_index: 0,
                quantity_requested: 100.0,
                details: "Request for recycling",
                outcome: None,
            },
            RequestSeed {
                requester_code: 105,
                waste_index: 1,
                quantity_requested: 50.0,
                details: "Approved exchange",
                outcome: Some("approve"),
            },
            RequestSeed {
                requester_code: 109,
                waste_index: 3,
                quantity_requested: 200.0,
                details: "Quantity unavailable",
                outcome: Some("reject"),
            },
        ];

        let pb = progress_bar(requests_data.len())?;
        for seed in requests_data {
            let waste_id = self.created_objects.wastes[seed.waste_index]["id"]
                .as_i64()
                .ok_or("waste id missing from response")?;
            let payload = json!({
                "industry_id": self.industry_id(seed.requester_code)?,
                "waste_id": waste_id,
                "quantity_requested": seed.quantity_requested,
                "details": seed.details
            });

            let mut request = Self::make_request(
                &self.config,
                Method::POST,
                "/api/dashboard/waste-requests",
                Some(&payload),
            )
            .await?;

            if let Some(action) = seed.outcome {
                let id = request["id"].as_i64().ok_or("request id missing from response")?;
                pb.set_message(format!("{action} request {id}"));
                request = Self::make_request(
                    &self.config,
                    Method::POST,
                    &format!("/api/dashboard/waste-requests/{id}/{action}"),
                    None,
                )
                .await?;
            }

            self.created_objects.requests.push(request);
            pb.inc(1);
        }

        pb.finish_with_message("Requests filed!");
        println!(
            "{} Filed {} requests",
            style("✔").green(),
            self.created_objects.requests.len()
        );

        Ok(())
    }

    pub async fn seed_database(&mut self, clear: bool) -> SeedResult<()> {
        println!();
        println!("{}", style("EcoCycle Database Seeder").bold().blue());
        println!("{}", style("Creating the demo waste exchange...").dim());
        println!();

        self.test_connection().await?;
        if clear {
            self.clear_existing().await?;
        }
        self.create_industries().await?;
        self.create_wastes().await?;
        self.create_requests().await?;

        self.display_summary();

        Ok(())
    }

    fn display_summary(&self) {
        println!();
        println!("{}", style("Database Seeding Complete!").bold().green());
        println!("{}", style("═".repeat(50)).dim());

        let summary_data = [
            ("Industries", self.created_objects.industries.len()),
            ("Wastes", self.created_objects.wastes.len()),
            ("Requests", self.created_objects.requests.len()),
        ];

        for (name, count) in summary_data {
            println!("{:.<20} {}", style(name).cyan(), style(count).bold().green());
        }

        for request in &self.created_objects.requests {
            println!(
                "  {} request {} is {}",
                style("•").dim(),
                request["id"],
                style(request["status"].as_str().unwrap_or("unknown")).yellow()
            );
        }
        println!();
    }
}

#[tokio::main]
async fn main() -> SeedResult<()> {
    let matches = Command::new("EcoCycle Database Seeder")
        .version("1.0")
        .about("Seeds the EcoCycle API with demo industries, wastes and requests")
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .value_name("URL")
                .help("API base URL")
                .default_value("http://localhost:5555"),
        )
        .arg(
            Arg::new("keep")
                .long("keep")
                .help("Keep existing data instead of deleting every industry first")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let base_url = matches
        .get_one::<String>("url")
        .map_or("http://localhost:5555", String::as_str);
    let clear = !matches.get_flag("keep");

    println!("{}", style("EcoCycle Database Seeder v1.0").bold());
    println!("{}", style("━".repeat(40)).dim());
    println!("API URL: {}", style(base_url).cyan());

    let mut seeder = DatabaseSeeder::new(base_url)?;
    seeder.seed_database(clear).await?;

    Ok(())
}

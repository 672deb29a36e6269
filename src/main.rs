//! Command-line quoting tool. Reads a booking request as JSON, prints the
//! priced quote (and delivery estimate, when a ship date is given) as JSON.
//!
//! Usage: freight_quote [--rates <rates.json>] [request.json]
//!
//! With no request file the request is read from stdin. The estimate field
//! is null whenever the estimator has insufficient data; pricing failures
//! exit non-zero.

use std::env;
use std::fs;
use std::io::Read;
use std::process::ExitCode;

use serde::{Deserialize, Serialize};

use freight_quote::{
    calculate_booking_pricing, calculate_delivery_estimate, BookingPricing, DeliveryEstimate,
    EstimateRequest, PackageInput, RateTable,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteRequest {
    destination: String,
    service: String,
    #[serde(default)]
    scheduled_date: Option<String>,
    #[serde(default = "default_include_customs")]
    include_customs: bool,
    packages: Vec<PackageInput>,
}

fn default_include_customs() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct QuoteResponse {
    pricing: BookingPricing,
    estimate: Option<DeliveryEstimate>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let mut rates_path: Option<String> = None;
    let mut request_path: Option<String> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--rates" => {
                rates_path = Some(args.next().ok_or("--rates needs a file path")?);
            }
            "--help" | "-h" => {
                println!("usage: freight_quote [--rates <rates.json>] [request.json]");
                return Ok(());
            }
            _ if request_path.is_none() => request_path = Some(arg),
            _ => return Err(format!("unexpected argument: {arg}")),
        }
    }

    let rates = match rates_path {
        Some(path) => RateTable::from_path(&path)
            .map_err(|err| format!("failed to load rate table {path}: {err}"))?,
        None => RateTable::builtin(),
    };

    let raw = match request_path {
        Some(path) => fs::read_to_string(&path)
            .map_err(|err| format!("failed to read request {path}: {err}"))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|err| format!("failed to read request from stdin: {err}"))?;
            buffer
        }
    };

    let request: QuoteRequest =
        serde_json::from_str(&raw).map_err(|err| format!("invalid quote request: {err}"))?;

    let pricing = calculate_booking_pricing(
        &rates,
        &request.destination,
        &request.service,
        &request.packages,
    )
    .map_err(|err| err.to_string())?;

    let estimate = request.scheduled_date.as_ref().and_then(|date| {
        let mut estimate_request = EstimateRequest::new(
            request.service.clone(),
            request.destination.clone(),
            date.clone(),
        );
        if !request.include_customs {
            estimate_request = estimate_request.without_customs();
        }
        calculate_delivery_estimate(&rates, &estimate_request)
    });

    let response = QuoteResponse { pricing, estimate };
    let json = serde_json::to_string_pretty(&response).map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}

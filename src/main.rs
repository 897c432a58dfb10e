use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use paysheet::application::checkout::{CheckoutResult, CheckoutSession};
use paysheet::domain::config::PaymentConfiguration;
use paysheet::domain::money::Money;
use paysheet::domain::request::RequestBuilder;
use paysheet::domain::response;
use paysheet::infrastructure::sandbox::{SandboxPaymentsClient, SheetBehavior};
use paysheet::interfaces::json::config_reader;
use paysheet::interfaces::json::document_writer::DocumentWriter;
use paysheet::observability::{LogFormat, init_logging};
use rust_decimal::Decimal;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Payment configuration JSON file. The sample settings are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the availability-check request
    ReadyRequest,

    /// Print the payment data request for a product
    PaymentRequest {
        /// Product price in currency units
        #[arg(long)]
        price: Decimal,

        /// Shipping cost in currency units
        #[arg(long, default_value = "90.00")]
        shipping: Decimal,
    },

    /// Print the DIRECT tokenization specification
    DirectSpec,

    /// Validate a payment data response and print what it carries
    Inspect {
        /// Response JSON file
        response: PathBuf,
    },

    /// Run a checkout against the sandbox payment sheet
    Checkout {
        /// Product price in currency units
        #[arg(long)]
        price: Decimal,

        /// Shipping cost in currency units
        #[arg(long, default_value = "90.00")]
        shipping: Decimal,

        /// Name on the billing address the payer picks
        #[arg(long, default_value = "Jane Doe")]
        billing_name: String,

        /// Payer closes the sheet
        #[arg(long, conflicts_with = "fail")]
        cancel: bool,

        /// Sheet fails with this status code
        #[arg(long)]
        fail: Option<i32>,

        /// Device reports the pay option as unavailable
        #[arg(long)]
        unavailable: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LogFormat::from_env());

    let config = match &cli.config {
        Some(path) => config_reader::load(path).into_diagnostic()?,
        None => PaymentConfiguration::default(),
    };
    let builder = RequestBuilder::new(&config);

    let stdout = io::stdout();
    let mut writer = DocumentWriter::new(stdout.lock());

    match cli.command {
        Command::ReadyRequest => {
            writer
                .write_document(&builder.availability_request())
                .into_diagnostic()?;
        }
        Command::PaymentRequest { price, shipping } => {
            let total = total_price(price, shipping)?;
            writer
                .write_document(&builder.payment_data_request(total))
                .into_diagnostic()?;
        }
        Command::DirectSpec => {
            let spec = builder.direct_tokenization().into_diagnostic()?;
            writer.write_document(&spec).into_diagnostic()?;
        }
        Command::Inspect { response: path } => {
            let text = std::fs::read_to_string(path).into_diagnostic()?;
            let doc = response::parse_response(&text).into_diagnostic()?;
            let summary = response::summarize(&doc).into_diagnostic()?;
            if summary.placeholder_gateway {
                warn!("response comes from the sample gateway, no real payment method was tokenized");
            }
            writer.write_document(&summary).into_diagnostic()?;
        }
        Command::Checkout {
            price,
            shipping,
            billing_name,
            cancel,
            fail,
            unavailable,
        } => {
            let behavior = match (cancel, fail) {
                (true, _) => SheetBehavior::Cancel,
                (false, Some(status_code)) => SheetBehavior::Fail { status_code },
                (false, None) => SheetBehavior::Approve { billing_name },
            };
            let client = SandboxPaymentsClient::new(behavior).with_ready_to_pay(!unavailable);
            let session = CheckoutSession::new(config.clone(), Box::new(client)).into_diagnostic()?;

            if !session.check_availability().await.into_diagnostic()? {
                warn!("pay option is not available, nothing to check out");
                return Ok(());
            }

            let product = Money::from_units(price).into_diagnostic()?;
            let shipping = Money::from_units(shipping).into_diagnostic()?;
            match session.checkout(product, shipping).await.into_diagnostic()? {
                CheckoutResult::Paid(summary) => writer.write_document(&summary).into_diagnostic()?,
                CheckoutResult::Cancelled => info!("checkout cancelled by the payer"),
            }
        }
    }

    Ok(())
}

fn total_price(price: Decimal, shipping: Decimal) -> Result<Money> {
    let product = Money::from_units(price).into_diagnostic()?;
    let shipping = Money::from_units(shipping).into_diagnostic()?;
    product
        .checked_add(shipping)
        .ok_or_else(|| miette::miette!("total price is out of range"))
}

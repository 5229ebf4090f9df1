//! Freight estimate commands

use alibaba_api::api::shipping::DEFAULT_DISPATCH_LOCATION;
use alibaba_api::{AdvancedFreightQuery, FreightQuery};
use clap::{Args, Subcommand};

use super::{output, parse_json, CliError, Context};

/// Shipping subcommands
#[derive(Subcommand)]
pub enum ShippingCommands {
    /// Estimate shipping for one product, falling back CN -> US -> MX
    Calculate(CalculateArgs),
    /// Estimate shipping for several products to a full address
    CalculateAdvanced(CalculateAdvancedArgs),
}

/// Arguments for calculate command
#[derive(Args)]
pub struct CalculateArgs {
    /// Product id
    #[arg(long)]
    pub product_id: String,

    /// Number of items
    #[arg(long)]
    pub quantity: u32,

    /// Destination country code, e.g. US
    #[arg(long)]
    pub destination_country: String,

    /// Destination ZIP code
    #[arg(long)]
    pub zip_code: Option<String>,

    /// Preferred origin (CN, US, MX)
    #[arg(long, default_value = DEFAULT_DISPATCH_LOCATION)]
    pub dispatch_location: String,

    /// Only try the preferred origin
    #[arg(long)]
    pub no_fallback: bool,
}

impl CalculateArgs {
    fn to_query(&self) -> FreightQuery {
        let mut query =
            FreightQuery::new(&self.product_id, self.quantity, &self.destination_country)
                .dispatch_location(&self.dispatch_location)
                .fallback(!self.no_fallback);
        if let Some(zip) = &self.zip_code {
            query = query.zip_code(zip);
        }
        query
    }
}

/// Arguments for calculate-advanced command
#[derive(Args)]
pub struct CalculateAdvancedArgs {
    /// Supplier company id from product details
    #[arg(long)]
    pub e_company_id: String,

    /// Destination country code
    #[arg(long)]
    pub destination_country: String,

    /// Shipping address as a JSON object
    #[arg(long)]
    pub address: String,

    /// Products to ship as a JSON array
    #[arg(long)]
    pub logistics_product_list: String,

    /// Origin location (CN, US, MX)
    #[arg(long, default_value = DEFAULT_DISPATCH_LOCATION)]
    pub dispatch_location: String,
}

/// Execute shipping commands
pub async fn execute(ctx: &Context, cmd: ShippingCommands) -> Result<(), CliError> {
    match cmd {
        ShippingCommands::Calculate(args) => {
            let query = args.to_query();
            let client = ctx.client()?;
            let quote = client.shipping().calculate_freight(&query).await?;

            if quote.fallback_used {
                output::echo_warning(&format!(
                    "Primary location {} had no results. Using {} instead.",
                    query.dispatch_location, quote.dispatch_location
                ));
            } else if quote.options.is_empty() {
                output::echo_warning("No shipping options found for any dispatch location");
            }
            ctx.print(&quote)
        }
        ShippingCommands::CalculateAdvanced(args) => {
            let query = AdvancedFreightQuery {
                address: parse_json("address", &args.address)?,
                logistics_product_list: parse_json(
                    "logistics-product-list",
                    &args.logistics_product_list,
                )?,
                e_company_id: args.e_company_id,
                destination_country: args.destination_country,
                dispatch_location: args.dispatch_location,
            };

            let client = ctx.client()?;
            let quote = client.shipping().calculate_freight_advanced(&query).await?;
            ctx.print(&quote)
        }
    }
}

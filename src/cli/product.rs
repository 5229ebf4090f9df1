//! Product discovery commands

use alibaba_api::api::products::DEFAULT_SCENE_ID;
use clap::{Args, Subcommand};

use super::{output, CliError, Context};

/// Product subcommands
#[derive(Subcommand)]
pub enum ProductCommands {
    /// List product ids in a scene
    List(ListArgs),
    /// Show product details
    Get(GetArgs),
    /// Check inventory levels
    Inventory(InventoryArgs),
    /// List products stocked in a local warehouse
    Local(LocalArgs),
    /// List cross-border products shipping from China
    Crossborder(PageArgs),
    /// List a scene and load details for each product
    Search(SearchArgs),
}

/// Paging options
#[derive(Args, Clone, Copy)]
pub struct PageArgs {
    /// Page number
    #[arg(long, default_value_t = 0)]
    pub page: u32,

    /// Items per page
    #[arg(long, default_value_t = 50)]
    pub page_size: u32,
}

/// Arguments for list command
#[derive(Args)]
pub struct ListArgs {
    /// Scene id, e.g. 906124611 (US fulfillment) or 906168847 (cross-border)
    #[arg(long)]
    pub scene_id: String,

    #[command(flatten)]
    pub paging: PageArgs,
}

/// Arguments for get command
#[derive(Args)]
pub struct GetArgs {
    /// Numeric product id
    #[arg(long)]
    pub product_id: String,

    /// Country the details are localized for
    #[arg(long, default_value = "US")]
    pub country: String,
}

/// Arguments for inventory command
#[derive(Args)]
pub struct InventoryArgs {
    /// Product id
    #[arg(long)]
    pub product_id: String,

    /// Restrict to one SKU
    #[arg(long)]
    pub sku_id: Option<String>,

    /// Origin country code (CN, US, MX)
    #[arg(long)]
    pub shipping_from: Option<String>,
}

/// Arguments for local command
#[derive(Args)]
pub struct LocalArgs {
    /// Warehouse country code, e.g. US or MX
    #[arg(long)]
    pub country: String,

    #[command(flatten)]
    pub paging: PageArgs,
}

/// Arguments for search command
#[derive(Args)]
pub struct SearchArgs {
    /// Scene to search
    #[arg(long, default_value = DEFAULT_SCENE_ID)]
    pub scene_id: String,

    /// Number of products to load
    #[arg(long, default_value_t = 5)]
    pub limit: u32,
}

/// Execute product commands
pub async fn execute(ctx: &Context, cmd: ProductCommands) -> Result<(), CliError> {
    let client = ctx.client()?;
    let products = client.products();

    match cmd {
        ProductCommands::List(args) => {
            let page = products
                .list_products(&args.scene_id, args.paging.page, args.paging.page_size)
                .await?;
            ctx.print(&page)
        }
        ProductCommands::Get(args) => {
            let product = products.get_product(&args.product_id, &args.country).await?;
            ctx.print(&product)
        }
        ProductCommands::Inventory(args) => {
            let inventory = products
                .get_product_inventory(
                    &args.product_id,
                    args.sku_id.as_deref(),
                    args.shipping_from.as_deref(),
                )
                .await?;
            ctx.print(&inventory)
        }
        ProductCommands::Local(args) => {
            let ids = products
                .get_local_products(&args.country, args.paging.page, args.paging.page_size)
                .await?;
            ctx.print(&ids)
        }
        ProductCommands::Crossborder(paging) => {
            let ids = products
                .get_crossborder_products(paging.page, paging.page_size)
                .await?;
            ctx.print(&ids)
        }
        ProductCommands::Search(args) => {
            output::echo_info(&format!("Searching scene {}...", args.scene_id));
            let result = products.search_products(&args.scene_id, args.limit).await?;

            if result.total_found == 0 {
                output::echo_warning("No products found");
            } else {
                output::echo_info(&format!(
                    "Successfully loaded {}/{} products",
                    result.successfully_loaded, result.total_found
                ));
            }
            ctx.print(&result)
        }
    }
}

//! Order management commands

use alibaba_api::api::orders::{DEFAULT_FUNDS_SELECT, DEFAULT_LANGUAGE, DEFAULT_LOGISTICS_SELECT};
use alibaba_api::{CreateOrderRequest, OrderListQuery, PaymentRequest};
use clap::{Args, Subcommand, ValueEnum};
use serde_json::{json, Value};

use super::{output, parse_json, CliError, Context};

/// Order subcommands
#[derive(Subcommand)]
pub enum OrderCommands {
    /// Create a BuyNow dropshipping order
    Create(CreateArgs),
    /// Pay one or more orders
    Pay(PayArgs),
    /// List orders
    List(ListArgs),
    /// Show order details
    Get(GetArgs),
    /// Show logistics status and tracking numbers
    Logistics(LogisticsArgs),
    /// Show tracking events
    Tracking(TradeIdArgs),
    /// Show payment and fund details
    Fund(FundArgs),
}

/// Arguments for create command
#[derive(Args)]
pub struct CreateArgs {
    /// Your own order reference
    #[arg(long)]
    pub channel_refer_id: String,

    /// Products as a JSON array, e.g. '[{"product_id":"1","sku_id":"2","quantity":"10"}]'
    #[arg(long)]
    pub product_list: String,

    /// Shipping details as a JSON object with shipment_address, dispatch_location, carrier_code
    #[arg(long)]
    pub logistics_detail: String,

    /// Order notes
    #[arg(long)]
    pub remark: Option<String>,
}

/// Arguments for pay command
#[derive(Args)]
pub struct PayArgs {
    /// Order ids as a JSON array, e.g. '["234193410001028893"]'
    #[arg(long)]
    pub order_id_list: String,

    /// Payment method
    #[arg(long, default_value = "CREDIT_CARD")]
    pub payment_method: String,

    /// Buyer IP address
    #[arg(long, default_value = "127.0.0.1")]
    pub user_ip: String,

    /// Buyer user agent
    #[arg(long, default_value = "alibaba-api/1.0")]
    pub user_agent: String,

    /// Validate the request and print it without paying
    #[arg(long)]
    pub dry_run: bool,
}

/// Order list role
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Role {
    /// Orders placed as buyer
    Buyer,
    /// Orders received as seller
    Seller,
}

impl Role {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Buyer => "buyer",
            Self::Seller => "seller",
        }
    }
}

/// Arguments for list command
#[derive(Args)]
pub struct ListArgs {
    /// Role to list orders for
    #[arg(long, value_enum, default_value_t = Role::Buyer)]
    pub role: Role,

    /// Filter by order status
    #[arg(long)]
    pub status: Option<String>,

    /// Page number
    #[arg(long, default_value_t = 0)]
    pub start_page: u32,

    /// Items per page
    #[arg(long, default_value_t = 20)]
    pub page_size: u32,
}

/// Arguments for commands that take only an order id
#[derive(Args)]
pub struct TradeIdArgs {
    /// Alibaba order id
    #[arg(long)]
    pub trade_id: String,
}

/// Arguments for get command
#[derive(Args)]
pub struct GetArgs {
    /// Alibaba order id
    #[arg(long)]
    pub trade_id: String,

    /// Response language
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,
}

/// Arguments for logistics command
#[derive(Args)]
pub struct LogisticsArgs {
    /// Alibaba order id
    #[arg(long)]
    pub trade_id: String,

    /// Data selection
    #[arg(long, default_value = DEFAULT_LOGISTICS_SELECT)]
    pub data_select: String,
}

/// Arguments for fund command
#[derive(Args)]
pub struct FundArgs {
    /// Alibaba order id
    #[arg(long)]
    pub trade_id: String,

    /// Data selection
    #[arg(long, default_value = DEFAULT_FUNDS_SELECT)]
    pub data_select: String,
}

/// Execute order commands
pub async fn execute(ctx: &Context, cmd: OrderCommands) -> Result<(), CliError> {
    match cmd {
        OrderCommands::Create(args) => execute_create(ctx, args).await,
        OrderCommands::Pay(args) => execute_pay(ctx, args).await,
        OrderCommands::List(args) => {
            let query = OrderListQuery {
                role: args.role.as_str().to_string(),
                status: args.status,
                start_page: args.start_page,
                page_size: args.page_size,
            };
            let client = ctx.client()?;
            let orders = client.orders().list_orders(&query).await?;
            ctx.print(&orders)
        }
        OrderCommands::Get(args) => {
            let client = ctx.client()?;
            let order = client
                .orders()
                .get_order(&args.trade_id, &args.language)
                .await?;
            ctx.print(&order)
        }
        OrderCommands::Logistics(args) => {
            let client = ctx.client()?;
            let logistics = client
                .orders()
                .get_order_logistics(&args.trade_id, &args.data_select)
                .await?;
            ctx.print(&logistics)
        }
        OrderCommands::Tracking(args) => {
            let client = ctx.client()?;
            let tracking = client.orders().get_order_tracking(&args.trade_id).await?;
            ctx.print(&tracking)
        }
        OrderCommands::Fund(args) => {
            let client = ctx.client()?;
            let funds = client
                .orders()
                .get_order_funds(&args.trade_id, &args.data_select)
                .await?;
            ctx.print(&funds)
        }
    }
}

async fn execute_create(ctx: &Context, args: CreateArgs) -> Result<(), CliError> {
    let request = CreateOrderRequest {
        product_list: parse_json("product-list", &args.product_list)?,
        logistics_detail: parse_json("logistics-detail", &args.logistics_detail)?,
        channel_refer_id: args.channel_refer_id,
        remark: args.remark,
    };

    let client = ctx.client()?;
    let created = client.orders().create_order(&request).await?;

    ctx.print(&json!({
        "trade_id": created.trade_id,
        "pay_url": created.pay_url,
        "channel_refer_id": request.channel_refer_id,
    }))?;

    let trade_id = created.trade_id.as_deref().unwrap_or_default();
    let mut hints = vec![
        format!("1. Pay for order: alibaba-cli order pay --order-id-list '[\"{trade_id}\"]'"),
        format!("2. Check status: alibaba-cli order get --trade-id {trade_id}"),
    ];
    if let Some(pay_url) = &created.pay_url {
        hints.push(format!("3. Manual payment: {pay_url}"));
    }
    output::echo_hints("Order created! Next steps:", &hints);
    Ok(())
}

async fn execute_pay(ctx: &Context, args: PayArgs) -> Result<(), CliError> {
    let order_ids = order_ids(&parse_json("order-id-list", &args.order_id_list)?)?;
    let request = PaymentRequest {
        order_ids,
        payment_method: args.payment_method,
        user_ip: args.user_ip,
        user_agent: args.user_agent,
    };

    if args.dry_run {
        output::echo_info("DRY RUN: request validated, not executing payment.");
        return ctx.print(&json!({
            "order_id_list": request.order_ids,
            "payment_method": request.payment_method,
            "user_ip": request.user_ip,
            "user_agent": request.user_agent,
        }));
    }

    let client = ctx.client()?;
    let result = client.orders().pay_orders(&request).await?;
    ctx.print(&result)
}

/// Accepts a JSON array of order ids given as strings or numbers.
fn order_ids(value: &Value) -> Result<Vec<String>, CliError> {
    let invalid = || CliError::InvalidParam(format!("--order-id-list {value}"));
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|id| match id {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(invalid()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_ids_accepts_strings_and_numbers() {
        let ids = order_ids(&json!(["1", 2])).unwrap();
        assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn test_order_ids_rejects_non_array() {
        assert!(matches!(
            order_ids(&json!({"id": 1})),
            Err(CliError::InvalidParam(_))
        ));
        assert!(order_ids(&json!([true])).is_err());
    }
}

//! Shinwari Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use shinwari_app::{
    config::LoyaltySettings,
    context::AppContext,
    domain::{
        accounts::{
            AccountsService,
            models::{AccountUuid, NewAccount},
        },
        branches::{
            BranchesService,
            models::{BranchUuid, NewBranch},
        },
        orders::{
            OrdersService,
            models::{OrderStatus, OrderUuid},
        },
    },
};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "shinwari-app", about = "Shinwari admin CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Account(AccountCommand),
    Branch(BranchCommand),
    Order(OrderCommand),
}

#[derive(Debug, Args)]
struct AccountCommand {
    #[command(subcommand)]
    command: AccountSubcommand,
}

#[derive(Debug, Subcommand)]
enum AccountSubcommand {
    Create(CreateAccountArgs),
}

#[derive(Debug, Args)]
struct CreateAccountArgs {
    /// Customer display name
    #[arg(long)]
    full_name: String,

    /// Customer email; unique per account
    #[arg(long)]
    email: String,

    /// Contact phone number
    #[arg(long)]
    phone: Option<String>,

    /// Delivery address
    #[arg(long)]
    address: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct BranchCommand {
    #[command(subcommand)]
    command: BranchSubcommand,
}

#[derive(Debug, Subcommand)]
enum BranchSubcommand {
    Create(CreateBranchArgs),
}

#[derive(Debug, Args)]
struct CreateBranchArgs {
    /// Branch display name
    #[arg(long)]
    name: String,

    /// Street address
    #[arg(long)]
    address: Option<String>,

    /// City
    #[arg(long)]
    city: Option<String>,

    /// Contact phone number
    #[arg(long)]
    phone: Option<String>,

    /// Mark this branch as the main branch
    #[arg(long)]
    is_main: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    SetStatus(SetOrderStatusArgs),
}

#[derive(Debug, Args)]
struct SetOrderStatusArgs {
    /// Order UUID
    #[arg(long)]
    order_uuid: Uuid,

    /// One of: pending, processing, delivered, cancelled
    #[arg(long)]
    status: OrderStatus,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Account(AccountCommand {
            command: AccountSubcommand::Create(args),
        }) => create_account(args).await,
        Commands::Branch(BranchCommand {
            command: BranchSubcommand::Create(args),
        }) => create_branch(args).await,
        Commands::Order(OrderCommand {
            command: OrderSubcommand::SetStatus(args),
        }) => set_order_status(args).await,
    }
}

async fn app_context(database_url: &str) -> Result<AppContext, String> {
    AppContext::from_database_url(database_url, LoyaltySettings::default())
        .await
        .map_err(|error| format!("failed to initialise application: {error}"))
}

async fn create_account(args: CreateAccountArgs) -> Result<(), String> {
    let ctx = app_context(&args.database_url).await?;

    let account = ctx
        .accounts
        .create_account(NewAccount {
            uuid: AccountUuid::new(),
            full_name: args.full_name,
            email: args.email,
            phone: args.phone,
            address: args.address,
        })
        .await
        .map_err(|error| format!("failed to create account: {error}"))?;

    println!("account_uuid: {}", account.uuid);
    println!("email: {}", account.email);

    Ok(())
}

async fn create_branch(args: CreateBranchArgs) -> Result<(), String> {
    let ctx = app_context(&args.database_url).await?;

    let branch = ctx
        .branches
        .create_branch(NewBranch {
            uuid: BranchUuid::new(),
            name: args.name,
            address: args.address,
            city: args.city,
            phone: args.phone,
            is_main: args.is_main,
        })
        .await
        .map_err(|error| format!("failed to create branch: {error}"))?;

    println!("branch_uuid: {}", branch.uuid);
    println!("name: {}", branch.name);

    Ok(())
}

async fn set_order_status(args: SetOrderStatusArgs) -> Result<(), String> {
    let ctx = app_context(&args.database_url).await?;

    let order = ctx
        .orders
        .update_status(OrderUuid::from_uuid(args.order_uuid), args.status)
        .await
        .map_err(|error| format!("failed to update order status: {error}"))?;

    println!("order_uuid: {}", order.uuid);
    println!("status: {}", order.status.as_str());

    Ok(())
}

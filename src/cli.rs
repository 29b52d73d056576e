//! Command Line
//!
//! Subcommands of the `candelle` binary and the handlers that run them.

use std::io;

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartChange, FileStorage, Notice, RecordingNotifier, Severity},
    catalog::{Catalog, ProductQuery, SortOrder},
    checkout::{CheckoutError, Order, ShippingDetails},
    config::Config,
    fixtures::FixtureError,
    pricing::OrderSummary,
    products::Product,
    receipt::{Receipt, ReceiptError},
    wishlist::Wishlist,
};

/// Related products shown on a product page.
const RELATED_LIMIT: usize = 4;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The catalog could not be loaded.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// No product has the requested id.
    #[error("No product with id `{0}`")]
    UnknownProduct(String),

    /// The cart receipt could not be written.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// The product is not saved in the wishlist.
    #[error("`{0}` is not in your wishlist")]
    NotInWishlist(String),

    /// The order could not be placed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Output could not be written.
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse products
    Products {
        /// Product action
        #[command(subcommand)]
        command: ProductsCommand,
    },

    /// List categories
    Categories,

    /// Manage the saved cart
    Cart {
        /// Cart action
        #[command(subcommand)]
        command: CartCommand,
    },

    /// Manage saved-for-later products
    Wishlist {
        /// Wishlist action
        #[command(subcommand)]
        command: WishlistCommand,
    },

    /// Place an order for the cart's contents
    Checkout(ShippingArgs),
}

/// Product browsing subcommands.
#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// Filter, sort and page through the catalog
    List(ListArgs),

    /// Show one product with its reviews and related products
    Show {
        /// Product id
        id: String,
    },

    /// Featured products
    Featured,

    /// Products with a reduced price
    Sale,

    /// Most recently added products
    New {
        /// How many to show
        #[arg(long, default_value_t = 4)]
        limit: usize,
    },
}

/// Shop listing filters.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only products in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Only products matching this text
    #[arg(long)]
    pub search: Option<String>,

    /// Inclusive lower price bound
    #[arg(long)]
    pub min_price: Option<Decimal>,

    /// Inclusive upper price bound
    #[arg(long)]
    pub max_price: Option<Decimal>,

    /// relevance, price-asc, price-desc, name-asc, name-desc or newest
    #[arg(long, default_value_t = SortOrder::Relevance)]
    pub sort: SortOrder,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

impl ListArgs {
    /// The listing query these arguments describe.
    pub fn into_query(self) -> ProductQuery {
        ProductQuery {
            category: self.category,
            search: self.search,
            min_price: self.min_price,
            max_price: self.max_price,
            sort: self.sort,
            page: self.page,
            ..ProductQuery::default()
        }
    }
}

/// Cart subcommands.
#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart with its order summary
    Show,

    /// Add units of a product
    Add {
        /// Product id
        id: String,

        /// Units to add
        #[arg(default_value_t = 1)]
        quantity: u32,
    },

    /// Remove a product
    Remove {
        /// Product id
        id: String,
    },

    /// Set the quantity of a product already in the cart
    Update {
        /// Product id
        id: String,

        /// New quantity; zero removes the line
        quantity: u32,
    },

    /// Empty the cart
    Clear,
}

/// Wishlist subcommands.
#[derive(Debug, Subcommand)]
pub enum WishlistCommand {
    /// Show saved products
    Show,

    /// Save a product for later
    Add {
        /// Product id
        id: String,
    },

    /// Forget a saved product
    Remove {
        /// Product id
        id: String,
    },

    /// Move one unit of a saved product into the cart
    Move {
        /// Product id
        id: String,
    },
}

/// Shipping details for checkout.
#[derive(Debug, Args)]
pub struct ShippingArgs {
    /// Given name
    #[arg(long, default_value_t)]
    pub first_name: String,

    /// Family name
    #[arg(long, default_value_t)]
    pub last_name: String,

    /// Contact email address
    #[arg(long, default_value_t)]
    pub email: String,

    /// Contact phone number
    #[arg(long, default_value_t)]
    pub phone: String,

    /// Street address
    #[arg(long, default_value_t)]
    pub address: String,

    /// City
    #[arg(long, default_value_t)]
    pub city: String,

    /// State or region
    #[arg(long, default_value_t)]
    pub state: String,

    /// Postal or ZIP code
    #[arg(long, default_value_t)]
    pub postal_code: String,

    /// Country
    #[arg(long, default_value_t)]
    pub country: String,
}

impl ShippingArgs {
    /// The shipping details these arguments describe.
    pub fn into_details(self) -> ShippingDetails {
        ShippingDetails {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            country: self.country,
        }
    }
}

type FileCart = Cart<FileStorage, RecordingNotifier>;

/// Run the configured command, writing its output to `out`.
///
/// # Errors
///
/// Returns a [`CliError`] if the catalog cannot be loaded, a product id is unknown, checkout is
/// rejected, or output cannot be written.
pub fn run(config: Config, out: &mut impl io::Write) -> Result<(), CliError> {
    let catalog = config.store.load_catalog()?;

    tracing::debug!(products = catalog.len(), "loaded catalog");

    let open_cart = || {
        Cart::with_config(
            config.store.cart_storage(),
            RecordingNotifier::new(),
            config.store.cart_config(),
        )
    };

    match config.command {
        Command::Products { command } => run_products(&catalog, command, out),
        Command::Categories => write_categories(&catalog, out),
        Command::Cart { command } => run_cart(&catalog, &mut open_cart(), command, out),
        Command::Wishlist { command } => {
            let mut wishlist = Wishlist::open(config.store.wishlist_storage());

            run_wishlist(&catalog, &mut wishlist, &mut open_cart(), command, out)
        }
        Command::Checkout(args) => run_checkout(&mut open_cart(), args.into_details(), out),
    }
}

fn run_products(
    catalog: &Catalog,
    command: ProductsCommand,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let currency = catalog.currency();

    match command {
        ProductsCommand::List(args) => {
            let page = catalog.list(&args.into_query());

            write_products(&page.products, currency, out)?;

            writeln!(
                out,
                "Page {} of {} ({} products)",
                page.page,
                page.total_pages.max(1),
                page.total
            )?;
        }
        ProductsCommand::Show { id } => write_product_page(catalog, &id, out)?,
        ProductsCommand::Featured => {
            write_products(&catalog.featured_products(), currency, out)?;
        }
        ProductsCommand::Sale => write_products(&catalog.products_on_sale(), currency, out)?,
        ProductsCommand::New { limit } => {
            write_products(&catalog.new_arrivals(limit), currency, out)?;
        }
    }

    Ok(())
}

fn run_cart(
    catalog: &Catalog,
    cart: &mut FileCart,
    command: CartCommand,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let change = match command {
        CartCommand::Show => None,
        CartCommand::Add { id, quantity } => {
            let product = catalog
                .product(&id)
                .ok_or_else(|| CliError::UnknownProduct(id.clone()))?;

            Some(cart.add_to_cart(product, quantity))
        }
        CartCommand::Remove { id } => Some(cart.remove_from_cart(&id)),
        CartCommand::Update { id, quantity } => Some(cart.update_quantity(&id, quantity)),
        CartCommand::Clear => Some(cart.clear()),
    };

    if let Some(change) = change {
        tracing::debug!(?change, "cart changed");
    }

    write_notices(&cart.notifier_mut().drain(), out)?;

    let summary = OrderSummary::for_cart(&*cart);

    Receipt::new(cart.lines(), summary).write_to(&mut *out)?;

    if !cart.is_empty() {
        writeln!(out, "{} items in cart", cart.item_count())?;
    }

    Ok(())
}

fn run_wishlist(
    catalog: &Catalog,
    wishlist: &mut Wishlist<FileStorage>,
    cart: &mut FileCart,
    command: WishlistCommand,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    match command {
        WishlistCommand::Show => {}
        WishlistCommand::Add { id } => {
            let product = catalog
                .product(&id)
                .ok_or_else(|| CliError::UnknownProduct(id.clone()))?;

            if wishlist.add(&id) {
                writeln!(out, "* Saved {} to your wishlist.", product.name)?;
            }
        }
        WishlistCommand::Remove { id } => {
            if wishlist.remove(&id) {
                writeln!(out, "* Removed {id} from your wishlist.")?;
            }
        }
        WishlistCommand::Move { id } => {
            if !wishlist.contains(&id) {
                return Err(CliError::NotInWishlist(id));
            }

            let change = wishlist
                .move_to_cart(&id, catalog, cart)
                .ok_or_else(|| CliError::UnknownProduct(id.clone()))?;

            tracing::debug!(?change, "moved wishlist item");

            write_notices(&cart.notifier_mut().drain(), out)?;

            if change != (CartChange::StockLimited { quantity: 0 }) {
                writeln!(out, "{} items in cart", cart.item_count())?;
            }
        }
    }

    let saved = wishlist.products(catalog);

    if saved.is_empty() {
        writeln!(out, "Your wishlist is empty.")?;
    } else {
        write_products(&saved, catalog.currency(), out)?;
    }

    Ok(())
}

fn run_checkout(
    cart: &mut FileCart,
    shipping: ShippingDetails,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let Order {
        shipping,
        lines,
        summary,
    } = cart.checkout(shipping)?;

    Receipt::new(&lines, summary).write_to(&mut *out)?;

    writeln!(
        out,
        "Order placed for {} {}. It ships to {}, {} {}, {}.",
        shipping.first_name,
        shipping.last_name,
        shipping.city,
        shipping.state,
        shipping.postal_code,
        shipping.country
    )?;

    Ok(())
}

fn write_notices(notices: &[Notice], out: &mut impl io::Write) -> io::Result<()> {
    for notice in notices {
        let marker = match notice.severity {
            Severity::Default => "*",
            Severity::Destructive => "!",
        };

        writeln!(out, "{marker} {notice}")?;
    }

    Ok(())
}

fn write_categories(catalog: &Catalog, out: &mut impl io::Write) -> Result<(), CliError> {
    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Products", "Description"]);

    for category in catalog.all_categories() {
        builder.push_record([
            category.id.clone(),
            category.name.clone(),
            catalog.products_by_category(&category.id).len().to_string(),
            category.description.clone(),
        ]);
    }

    let mut table = builder.build();

    table.with(theme());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..3), Alignment::right());

    writeln!(out, "{table}")?;

    Ok(())
}

fn write_products(
    products: &[&Product],
    currency: &Currency,
    out: &mut impl io::Write,
) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No products found.");
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Name", "Category", "Price", "Stock"]);

    for product in products {
        builder.push_record([
            product.id.clone(),
            product.name.clone(),
            product.category.clone(),
            price_label(product, currency),
            product.stock.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(theme());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..5), Alignment::right());

    writeln!(out, "{table}")
}

fn write_product_page(
    catalog: &Catalog,
    id: &str,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let product = catalog
        .product(id)
        .ok_or_else(|| CliError::UnknownProduct(id.to_string()))?;

    let currency = catalog.currency();

    writeln!(out, "{}  {}", product.name, price_label(product, currency))?;
    writeln!(out, "{}", product.description)?;

    if !product.scent_notes.is_empty() {
        writeln!(out, "Scent notes: {}", product.scent_notes.join(", "))?;
    }

    if let Some(hours) = product.burn_time {
        writeln!(out, "Burn time: {hours} hours")?;
    }

    if product.in_stock() {
        writeln!(out, "In stock: {}", product.stock)?;
    } else {
        writeln!(out, "Out of stock")?;
    }

    let reviews = catalog.reviews(id);

    match catalog.average_rating(id) {
        Some(rating) => writeln!(out, "\nRated {rating} / 5 from {} reviews", reviews.len())?,
        None => writeln!(out, "\nNo reviews yet")?,
    }

    for review in reviews {
        let verified = if review.verified { " (verified)" } else { "" };

        writeln!(
            out,
            "  {}/5 {} by {}{verified}\n    {}",
            review.rating, review.title, review.user_name, review.content
        )?;
    }

    let related = catalog.related_products(id, RELATED_LIMIT);

    if !related.is_empty() {
        writeln!(out, "\nYou may also like")?;
        write_products(&related, currency, out)?;
    }

    Ok(())
}

fn price_label(product: &Product, currency: &Currency) -> String {
    let price = Money::from_decimal(product.price, currency);

    match product.original_price {
        Some(original) if product.is_on_sale() => {
            format!("{price} (was {})", Money::from_decimal(original, currency))
        }
        _ => price.to_string(),
    }
}

fn theme() -> Theme {
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();

    theme
}

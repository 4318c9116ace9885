//! # Vitral CLI
//!
//! Prompt-driven front end for the glass and frame calculators.
//!
//! ```text
//! vitral glass [--remote] [--config vitral.toml]
//! vitral frame [--config vitral.toml]
//! vitral cart  [--config vitral.toml]
//! ```
//!
//! Glass is priced from the built-in sample catalog, or from the pricing
//! service configured under `[service]` when `--remote` is given. Priced lines
//! can be added to the cart, which is saved between runs.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use pricing_core::calculations::frame::{self, FrameGlass, FrameInput, FrameResult};
use pricing_core::calculations::glass::{GlassQuote, GlassQuoteInput};
use pricing_core::catalog::{GlassColor, GlassFamily, GlassFinish, PriceCatalog, MAX_CROSSBEAMS};
use pricing_core::dimensions::Dimensions;
use pricing_core::file_io::{load_or_new_cart, save_cart};
use pricing_core::pricing::narrow_thicknesses;
use pricing_core::rules::{available_colors, available_finishes};
use pricing_core::selection::{GlassSelection, SelectionChange};
use pricing_core::services::{ServiceKind, ServiceSelection};
use pricing_core::{
    load_config, Cart, HttpPricingService, Preview, PricingConfig, PricingService, QuoteError,
    QuoteResult, Recalculator, Recompute,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CART_PROMPT: &str = "remove <n> | qty <n> <q> | clear | quote <client> | done: ";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Glass,
    Frame,
    Cart,
}

struct Args {
    command: Command,
    remote: bool,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut command = None;
    let mut remote = false;
    let mut config = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "glass" => command = Some(Command::Glass),
            "frame" => command = Some(Command::Frame),
            "cart" => command = Some(Command::Cart),
            "--remote" => remote = true,
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }

    Ok(Args {
        command: command.unwrap_or(Command::Glass),
        remote,
        config,
    })
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,pricing_core=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input).ok()?;
    Some(input.trim().to_string())
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    read_line(prompt).and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn prompt_u32(prompt: &str, default: u32) -> u32 {
    read_line(prompt).and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn prompt_string(prompt: &str, default: &str) -> String {
    match read_line(prompt) {
        Some(s) if !s.is_empty() => s,
        _ => default.to_string(),
    }
}

fn prompt_yes(prompt: &str) -> bool {
    matches!(read_line(prompt).as_deref(), Some("y") | Some("Y") | Some("s") | Some("S"))
}

/// Pick from a non-empty list by number; blank or out-of-range keeps the first entry.
fn prompt_choice<T: Copy>(label: &str, options: &[T], show: impl Fn(&T) -> String) -> T {
    if options.len() > 1 {
        println!("{}:", label);
        for (i, option) in options.iter().enumerate() {
            println!("  {}) {}", i + 1, show(option));
        }
    }
    let index = if options.len() > 1 {
        prompt_u32(&format!("Choose {} [1]: ", label.to_lowercase()), 1) as usize
    } else {
        1
    };
    options[index.clamp(1, options.len()) - 1]
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!();
    println!("JSON Output:");
    if let Ok(json) = serde_json::to_string_pretty(value) {
        println!("{}", json);
    }
}

fn report_error(e: &QuoteError) {
    eprintln!("Error: {}", e.user_message());
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

async fn prompt_glass_selection(
    service: &dyn PricingService,
    company_id: &str,
) -> QuoteResult<GlassSelection> {
    let family = prompt_choice("Family", &GlassFamily::ALL, |f| f.display_name().to_string());
    let mut selection = GlassSelection::new(family);

    let listed = service.list_thicknesses(company_id, family).await?;
    let thicknesses = narrow_thicknesses(family, &listed);
    if thicknesses.is_empty() {
        return Err(QuoteError::catalog_entry_not_found(format!("{} thicknesses", family.code())));
    }
    let thickness = prompt_choice("Thickness", &thicknesses, |t| format!("{}mm", t));
    selection = selection.apply(SelectionChange::Thickness(thickness));

    let finishes = available_finishes(family, selection.thickness_mm);
    let finish: GlassFinish = prompt_choice("Finish", &finishes, |f| f.display_name().to_string());
    selection = selection.apply(SelectionChange::Finish(finish));

    let colors = available_colors(family, selection.finish, selection.thickness_mm);
    let color: GlassColor = prompt_choice("Color", &colors, |c| c.display_name().to_string());
    selection = selection.apply(SelectionChange::Color(color));

    if family == GlassFamily::Catedral && selection.finish == GlassFinish::Color {
        let custom = prompt_string("Color description []: ", "");
        selection = selection.apply(SelectionChange::CustomColor(custom));
    }
    Ok(selection)
}

fn prompt_services() -> ServiceSelection {
    let mut services = ServiceSelection::default();
    for kind in ServiceKind::ALL {
        if !prompt_yes(&format!("{}? [y/N]: ", kind.display_name())) {
            continue;
        }
        services.enable(kind);
        if kind.has_qty() {
            services.set_quantity(kind, prompt_u32("  How many? [1]: ", 1).max(1));
        }
    }
    services
}

fn print_glass_quote(quote: &GlassQuote) {
    println!();
    println!("═══════════════════════════════════════");
    println!("  GLASS QUOTE");
    println!("═══════════════════════════════════════");
    println!("  {}", quote.description);
    println!("  Area:       {:.2} ft²", quote.area_sq_ft);
    println!("  Piece:      S/ {:.2} (before rounding)", quote.raw_unit_price);
    println!("  Unit price: S/ {:.2}", quote.unit_price);
    println!("  Quantity:   {}", quote.quantity);
    println!("  Total:      S/ {:.2}", quote.total_price);
    println!("═══════════════════════════════════════");
}

async fn run_glass(
    config: &PricingConfig,
    service: Arc<dyn PricingService>,
    cart: &mut Cart,
) -> QuoteResult<bool> {
    let company_id = config.session.company_id.as_str();
    let selection = prompt_glass_selection(service.as_ref(), company_id).await?;

    let width_cm = prompt_f64("Width (cm) [100]: ", 100.0);
    let height_cm = prompt_f64("Height (cm) [100]: ", 100.0);
    let quantity = prompt_u32("Quantity [1]: ", 1);
    let services = prompt_services();

    let input = GlassQuoteInput {
        selection,
        dimensions: Dimensions { width_cm, height_cm },
        services,
        quantity,
    };

    let recalculator = Recalculator::from_config(service, config);
    let quote = match recalculator.recalculate(&input).await {
        Recompute::Applied(Preview::Ready(quote)) => quote,
        Recompute::Applied(Preview::Error(message)) => {
            eprintln!("Error: {}", message);
            return Ok(false);
        }
        Recompute::Applied(Preview::Empty) | Recompute::Superseded => {
            println!("Nothing to price: check the size and quantity.");
            return Ok(false);
        }
    };

    print_glass_quote(&quote);
    print_json(&quote);

    if prompt_yes("Add to cart? [y/N]: ") {
        cart.add_glass(input, &quote);
        return Ok(true);
    }
    Ok(false)
}

fn prompt_frame_input(catalog: &PriceCatalog) -> QuoteResult<FrameInput> {
    if catalog.moldings.is_empty() {
        return Err(QuoteError::catalog_entry_not_found("moldings"));
    }
    let indices: Vec<usize> = (0..catalog.moldings.len()).collect();
    let molding_index = prompt_choice("Molding", &indices, |i| {
        let m = &catalog.moldings[*i];
        format!("{} ({}, S/ {:.2}/m)", m.name, m.quality, m.price_per_meter)
    });
    let molding = catalog.moldings[molding_index].clone();

    let width_cm = prompt_f64("Width (cm) [60]: ", 60.0);
    let height_cm = prompt_f64("Height (cm) [40]: ", 40.0);

    let crossbeams = if molding.quality.supports_crossbeams() {
        let prompt = format!("Crossbeams (0-{}) [0]: ", MAX_CROSSBEAMS);
        prompt_u32(&prompt, 0).min(u32::from(MAX_CROSSBEAMS)) as u8
    } else {
        0
    };

    let glass = if prompt_yes("Include glass? [y/N]: ") {
        let family = prompt_choice("Family", &[GlassFamily::Plano, GlassFamily::Espejo], |f| {
            f.display_name().to_string()
        });
        let thicknesses = catalog.priced_thicknesses(family);
        if thicknesses.is_empty() {
            return Err(QuoteError::catalog_entry_not_found(format!(
                "{} thicknesses",
                family.code()
            )));
        }
        let thickness = prompt_choice("Thickness", &thicknesses, |t| format!("{}mm", t));
        let selection = GlassSelection::new(family).apply(SelectionChange::Thickness(thickness));
        Some(FrameGlass::from_catalog(catalog, selection)?)
    } else {
        None
    };

    let offer_background = !catalog.backgrounds.is_empty();
    let background = if offer_background && prompt_yes("Include background? [y/N]: ") {
        let indices: Vec<usize> = (0..catalog.backgrounds.len()).collect();
        let i = prompt_choice("Background", &indices, |i| catalog.backgrounds[*i].label());
        Some(catalog.backgrounds[i].clone())
    } else {
        None
    };

    let texture = Some(prompt_string("Texture []: ", "")).filter(|s| !s.is_empty());
    let color = Some(prompt_string("Color []: ", "")).filter(|s| !s.is_empty());
    let quantity = prompt_u32("Quantity [1]: ", 1);

    Ok(FrameInput {
        molding,
        dimensions: Dimensions { width_cm, height_cm },
        glass,
        background,
        crossbeams,
        texture,
        color,
        quantity,
    })
}

fn print_frame_result(result: &FrameResult) {
    let b = &result.breakdown;
    println!();
    println!("═══════════════════════════════════════");
    println!("  FRAME QUOTE");
    println!("═══════════════════════════════════════");
    println!("  {}", result.description);
    println!("  Frame size: {}", result.frame_dimensions.label());
    println!("  Perimeter:  {:.2} m", result.perimeter_m);
    println!();
    println!("  Molding:    S/ {:.2}", b.molding_cost);
    println!("  Glass:      S/ {:.2} ({:.2} ft²)", b.glass_cost, result.glass_area_sq_ft);
    println!("  Crossbeams: S/ {:.2}", b.crossbeam_cost);
    println!(
        "  Background: S/ {:.2} ({:.2} ft²)",
        b.background_cost, result.background_area_sq_ft
    );
    println!();
    println!("  Unit price: S/ {:.2}", b.unit_price);
    println!("  Quantity:   {}", result.quantity);
    println!("  Total:      S/ {:.2}", b.total_price);
    println!("═══════════════════════════════════════");
}

fn run_frame(config: &PricingConfig, catalog: &PriceCatalog, cart: &mut Cart) -> QuoteResult<bool> {
    let input = prompt_frame_input(catalog)?;
    let result = frame::calculate(&input, config.rounding.frame)?;

    print_frame_result(&result);
    print_json(&result);

    if prompt_yes("Add to cart? [y/N]: ") {
        cart.add_frame(input, &result);
        return Ok(true);
    }
    Ok(false)
}

fn print_cart(cart: &Cart) {
    println!();
    if cart.is_empty() {
        println!("Cart is empty.");
        return;
    }
    for (i, line) in cart.items.iter().enumerate() {
        println!(
            "  {}) {} x{} @ S/ {:.2} = S/ {:.2}",
            i + 1,
            line.description,
            line.quantity,
            line.unit_price,
            line.subtotal
        );
    }
    println!("  Total: S/ {:.2}", cart.total());
}

/// 1-based line number to index.
fn line_index(cart: &Cart, n: &str) -> Option<usize> {
    let i = n.parse::<usize>().ok()?.checked_sub(1)?;
    (i < cart.line_count()).then_some(i)
}

/// Returns whether the cart changed.
fn run_cart(config: &PricingConfig, cart: &mut Cart) -> QuoteResult<bool> {
    let mut changed = false;
    loop {
        print_cart(cart);
        println!();
        let Some(line) = read_line(CART_PROMPT) else {
            break;
        };
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            ["remove", n] => match line_index(cart, n) {
                Some(i) => {
                    let id = cart.items[i].id;
                    cart.remove_line(&id);
                    changed = true;
                }
                None => println!("No line {}", n),
            },
            ["qty", n, q] => match (line_index(cart, n), q.parse::<u32>()) {
                (Some(i), Ok(quantity)) => {
                    let id = cart.items[i].id;
                    match cart.update_quantity(&id, quantity) {
                        Ok(_) => changed = true,
                        Err(e) => report_error(&e),
                    }
                }
                _ => println!("Usage: qty <line> <quantity>"),
            },
            ["clear"] => {
                cart.clear();
                changed = true;
            }
            ["quote", client @ ..] if !client.is_empty() => {
                match cart.to_quote_draft(&config.session.company_id, client.join(" ")) {
                    Ok(draft) => print_json(&draft),
                    Err(e) => report_error(&e),
                }
            }
            ["done"] | [] => break,
            _ => println!("Unknown command"),
        }
    }
    Ok(changed)
}

async fn run(args: Args) -> QuoteResult<()> {
    let config = load_config(args.config.as_deref())?;
    let catalog = PriceCatalog::sample();

    let service: Arc<dyn PricingService> = if args.remote {
        let http = HttpPricingService::new(&config.service)?;
        tracing::info!(base_url = http.base_url(), "using remote pricing service");
        Arc::new(http)
    } else {
        let mut local = catalog.clone();
        local.company_id = config.session.company_id.clone();
        Arc::new(local)
    };

    let cart_path = config.session.cart_path.clone();
    let mut cart = load_or_new_cart(&cart_path)?;

    let changed = match args.command {
        Command::Glass => run_glass(&config, service, &mut cart).await?,
        Command::Frame => run_frame(&config, catalog, &mut cart)?,
        Command::Cart => run_cart(&config, &mut cart)?,
    };

    if changed {
        save_cart(&cart, &cart_path)?;
        println!("Cart: {} line(s), S/ {:.2}", cart.line_count(), cart.total());
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();

    println!("Vitral - Glass & Frame Calculator");
    println!("=================================");
    println!();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: vitral [glass|frame|cart] [--remote] [--config <path>]");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args).await {
        report_error(&e);
        std::process::exit(1);
    }
}

use chrono::{DateTime, Utc};
use colored::Colorize;
use shopkeep::api::{CmdMessage, ImageSummary, MessageLevel, StatusReport};
use shopkeep::config::ShopConfig;
use shopkeep::model::{Product, SiteSettings, SETTINGS_FIELDS};
use shopkeep::store::images::format_size;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 15;
const PRICE_WIDTH: usize = 11;
const TIME_WIDTH: usize = 14;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_products(products: &[Product]) {
    for product in products {
        let id = pad_to_width(&product.id, ID_WIDTH);
        let price = format!("{:>width$.2}", product.price, width = PRICE_WIDTH);
        let marker = if product.in_stock { "  " } else { " ✗" };

        let label = if product.category.is_empty() {
            product.name.clone()
        } else {
            format!("{} [{}]", product.name, product.category)
        };
        let available = LINE_WIDTH.saturating_sub(ID_WIDTH + PRICE_WIDTH + marker.width());
        let label = pad_to_width(&truncate_to_width(&label, available), available);

        let line_label = if product.in_stock {
            label.normal()
        } else {
            label.dimmed()
        };
        println!("{}{}{}{}", id.yellow(), line_label, price, marker.red());
    }
}

pub(super) fn print_settings(settings: &SiteSettings) {
    let key_width = SETTINGS_FIELDS.iter().map(|k| k.width()).max().unwrap_or(0);
    for key in SETTINGS_FIELDS {
        let value = settings.field(key).unwrap_or_default();
        println!("{} = {}", pad_to_width(key, key_width).bold(), value);
    }
}

pub(super) fn print_images(images: &[ImageSummary]) {
    for image in images {
        let id = pad_to_width(&image.id, ID_WIDTH);
        let size = format!("{:>10}", format_size(image.size));
        let available = LINE_WIDTH.saturating_sub(ID_WIDTH + 10 + TIME_WIDTH);
        let name = pad_to_width(&truncate_to_width(&image.name, available), available);
        println!(
            "{}{}{}{}",
            id.yellow(),
            name,
            size,
            format_time_ago(image.uploaded_at).dimmed()
        );
    }
}

pub(super) fn print_status(status: &StatusReport) {
    let session = if status.authenticated {
        "admin".green()
    } else {
        "public".normal()
    };
    println!("{:<10}{}", "session", session);
    println!("{:<10}v{} ({})", "data", status.version, status.origin);
    println!(
        "{:<10}{} ({} in stock)",
        "products", status.products, status.in_stock
    );
    println!("{:<10}{}", "images", status.images);
    if status.has_changes {
        println!("{}", "Unexported changes: run `shopkeep export`".yellow());
    }
}

pub(super) fn print_config(config: &ShopConfig) {
    for key in shopkeep::config::CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let current = s.width();
    if current >= width {
        format!("{} ", s)
    } else {
        format!("{}{}", s, " ".repeat(width - current))
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

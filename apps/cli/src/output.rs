//! Plain-text rendering of API results.

use estate_catalog::{PublicProperty, QueryPage};

const HEADERS: [&str; 4] = ["NAME", "ADDRESS", "PRICE", "OWNER"];

fn row(property: &PublicProperty) -> [String; 4] {
    [
        property.name.clone(),
        property.address.clone(),
        property.price.to_string(),
        property.owner_id.clone(),
    ]
}

/// Left-aligned columns separated by two spaces.
pub fn table(properties: &[PublicProperty]) -> String {
    let rows: Vec<[String; 4]> = properties.iter().map(row).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for r in &rows {
        for (width, cell) in widths.iter_mut().zip(r.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = HEADERS.map(str::to_string);
    for cells in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| {
                let pad = width - cell.chars().count();
                format!("{cell}{}", " ".repeat(pad))
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

pub fn page(page: &QueryPage<PublicProperty>) -> String {
    if page.items.is_empty() {
        return format!(
            "No listings on page {} ({} total)\n",
            page.page, page.total
        );
    }
    format!(
        "{}\npage {} of {}, {} total\n",
        table(&page.items),
        page.page,
        page.page_count().max(1),
        page.total
    )
}

pub fn property(property: &PublicProperty) -> String {
    format!(
        "Name:    {}\nAddress: {}\nPrice:   {}\nOwner:   {}\nImage:   {}\n",
        property.name, property.address, property.price, property.owner_id, property.image
    )
}

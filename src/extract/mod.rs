// src/extract/mod.rs

use scraper::{ElementRef, Html, Selector};
use tracing::trace;

use crate::geo::Gazetteer;
use crate::record::{DateWindow, PriceRecord};

/// What the results page contained for one query.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// A table was present; these are its data rows (possibly none).
    Rows(Vec<PriceRecord>),
    /// No `<table>` on the page. The portal does this when it has nothing
    /// for the commodity/date, so it is not an error.
    NoTable,
}

impl Extraction {
    pub fn len(&self) -> usize {
        match self {
            Extraction::Rows(rows) => rows.len(),
            Extraction::NoTable => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_rows(self) -> Vec<PriceRecord> {
        match self {
            Extraction::Rows(rows) => rows,
            Extraction::NoTable => Vec::new(),
        }
    }
}

/// Trimmed `<td>` texts of every `<tr>` in the first `<table>` of `html`,
/// or `None` if the page has no table. Header rows (`<th>` only) come back
/// empty.
pub fn raw_rows(html: &str) -> Option<Vec<Vec<String>>> {
    let table_sel = Selector::parse("table").expect("table selector should parse");
    let row_sel = Selector::parse("tr").expect("row selector should parse");
    let cell_sel = Selector::parse("td").expect("cell selector should parse");

    let document = Html::parse_document(html);
    let table = document.select(&table_sel).next()?;

    Some(
        table
            .select(&row_sel)
            .map(|row| row.select(&cell_sel).map(cell_text).collect())
            .collect(),
    )
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Parse the results page into records tagged with `commodity` and `date`.
///
/// Rows with two or fewer cells are headers or separators and are dropped.
/// The first cell is the location and is resolved against `gazetteer`.
pub fn extract_records(
    html: &str,
    commodity: &str,
    date: &DateWindow,
    gazetteer: &Gazetteer,
) -> Extraction {
    let Some(rows) = raw_rows(html) else {
        return Extraction::NoTable;
    };
    let iso = date.iso();

    let records = rows
        .into_iter()
        .filter(|cells| cells.len() > 2)
        .map(|cells| {
            let mut cells = cells.into_iter();
            let location = cells.next().unwrap_or_default();
            let price = cells.next().unwrap_or_default();
            let percent_change = cells.next().unwrap_or_default();
            let coordinates = gazetteer.resolve(&location);
            trace!(%location, ?coordinates, "row");
            PriceRecord {
                date: iso.clone(),
                commodity: commodity.to_string(),
                location,
                price,
                percent_change,
                coordinates,
                extra: cells.collect(),
            }
        })
        .collect();

    Extraction::Rows(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::CoordinatePair;
    use chrono::NaiveDate;

    fn day() -> DateWindow {
        DateWindow::new(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap())
    }

    fn table(rows: &[&[&str]]) -> String {
        let mut html = String::from(
            "<html><body><table><thead><tr><th>Provinsi</th><th>Harga</th><th>Perubahan</th></tr></thead><tbody>",
        );
        for row in rows {
            html.push_str("<tr>");
            for cell in *row {
                html.push_str(&format!("<td> {} </td>", cell));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table></body></html>");
        html
    }

    #[test]
    fn page_without_table() {
        let out = extract_records("<div>Data tidak tersedia</div>", "Beras", &day(), &Gazetteer::indonesia());
        assert_eq!(out, Extraction::NoTable);
        assert!(out.is_empty());
    }

    #[test]
    fn short_rows_are_dropped() {
        let html = table(&[&["", ""], &["Total"], &["Jakarta", "Rp 12.000", "+1.2%"]]);
        let rows = extract_records(&html, "Beras SPHP", &day(), &Gazetteer::indonesia()).into_rows();

        assert_eq!(rows.len(), 1);
        let r = &rows[0];
        assert_eq!(r.location, "Jakarta");
        assert_eq!(r.price, "Rp 12.000");
        assert_eq!(r.percent_change, "+1.2%");
        assert_eq!(r.date, "2025-06-02");
        assert_eq!(r.commodity, "Beras SPHP");
        assert!(r.extra.is_empty());
        // "Jakarta" alone does not contain "DKI JAKARTA"
        assert_eq!(r.coordinates, CoordinatePair::UNRESOLVED);
    }

    #[test]
    fn table_with_only_noise_is_still_a_table() {
        let html = table(&[&["", ""]]);
        let out = extract_records(&html, "Beras", &day(), &Gazetteer::indonesia());
        assert_eq!(out, Extraction::Rows(vec![]));
    }

    #[test]
    fn locations_resolve_and_extra_cells_are_kept() {
        let html = table(&[&["Jawa Timur", "Rp 15.250", "-0,5%", "Naik", "12"]]);
        let rows = extract_records(&html, "Gula Konsumsi", &day(), &Gazetteer::indonesia()).into_rows();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].coordinates, CoordinatePair::new(-7.5361, 112.2384));
        assert_eq!(rows[0].extra, vec!["Naik".to_string(), "12".to_string()]);
    }

    #[test]
    fn only_the_first_table_is_read() {
        let html = format!(
            "{}<table><tr><td>BALI</td><td>Rp 1</td><td>0%</td></tr></table>",
            table(&[&["ACEH", "Rp 2", "0%"]])
        );
        let rows = extract_records(&html, "Beras", &day(), &Gazetteer::indonesia()).into_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].location, "ACEH");
    }

    #[test]
    fn nested_markup_is_flattened() {
        let html = "<table><tr><td><a href='#'><b>DKI</b> Jakarta</a></td><td><span>Rp</span> 14.000</td><td>0%</td></tr></table>";
        let cells = raw_rows(html).unwrap();
        assert_eq!(cells, vec![vec!["DKI Jakarta", "Rp 14.000", "0%"]]);
    }
}

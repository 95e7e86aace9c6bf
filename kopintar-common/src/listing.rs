//! Farmer list: display rows, search, client-side pagination

use serde_json::Value;

use crate::petani::*;
use crate::ApiError;

pub const PAGE_SIZE: usize = 10;

/// One table row plus the full record it came from
#[derive(Clone, Debug, PartialEq)]
pub struct PetaniRow {
    pub id: String,
    pub nama: String,
    pub dusun: String,
    pub kelompok_tani: String,
    pub usia: String,
    pub no_hp: String,
    pub luas_lahan: String,
    pub produksi: String,
    pub harga: String,
    pub full: PetaniRecord,
}

impl PetaniRow {
    pub fn from_record(record: PetaniRecord, index: usize) -> Self {
        let id = record
            .text(NO)
            .unwrap_or_else(|| (index + 1).to_string());
        Self {
            id,
            nama: record.display(NAMA, "-"),
            dusun: record.display(DUSUN, "-"),
            kelompok_tani: record.display(KELOMPOK_TANI, "-"),
            usia: record.display(USIA, "-"),
            no_hp: record.display(NO_HP, "-"),
            luas_lahan: record.display(TOTAL_LAHAN, "-"),
            produksi: record.display(HASIL_PER_TAHUN, "-"),
            harga: record.display(HARGA_JUAL, "-"),
            full: record,
        }
    }
}

pub fn normalize_rows(raw: Vec<Value>) -> Vec<PetaniRow> {
    raw.into_iter()
        .enumerate()
        .map(|(i, v)| PetaniRow::from_record(PetaniRecord::from_value(v), i))
        .collect()
}

/// Case-insensitive substring match on name or hamlet
pub fn filter_rows<'a>(rows: &'a [PetaniRow], query: &str) -> Vec<&'a PetaniRow> {
    let needle = query.trim().to_lowercase();
    rows.iter()
        .filter(|row| {
            needle.is_empty()
                || row.nama.to_lowercase().contains(&needle)
                || row.dusun.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Page cursor over a filtered set; pages are 1-based
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl Pagination {
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// Slice bounds of the current page
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.page.saturating_sub(1) * self.page_size;
        let end = (start + self.page_size).min(self.total);
        start.min(end)..end
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn prev(&mut self) {
        if self.has_prev() {
            self.page -= 1;
        }
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.page += 1;
        }
    }

    /// New filtered size; keeps the page in range
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.page = self.page.clamp(1, self.total_pages().max(1));
    }

    pub fn label(&self) -> String {
        format!("Halaman {} dari {}", self.page, self.total_pages().max(1))
    }
}

/// Fetch lifecycle of the list page
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Ready(Vec<PetaniRow>),
    Error(ApiError),
}

impl ListState {
    pub fn rows(&self) -> &[PetaniRow] {
        match self {
            ListState::Ready(rows) => rows,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<PetaniRow> {
        normalize_rows(vec![
            json!({"NO": 1, "NAMA": "Budi Santoso", "DUSUN": "Sumberurip", "USIA": 40}),
            json!({"NO": 2, "NAMA": "Siti", "DUSUN": "Jawai Talu"}),
            json!({"NAMA": "Sumarno", "DUSUN": "Sumbermanggis"}),
        ])
    }

    #[test]
    fn test_normalize_fills_placeholders() {
        let rows = rows();
        assert_eq!(rows[0].usia, "40");
        assert_eq!(rows[1].usia, "-");
        assert_eq!(rows[1].harga, "-");
        assert_eq!(rows[2].id, "3");
        assert_eq!(rows[2].full.nama(), "Sumarno");
    }

    #[test]
    fn test_filter_matches_name_or_hamlet() {
        let rows = rows();
        assert_eq!(filter_rows(&rows, "").len(), 3);
        assert_eq!(filter_rows(&rows, "SITI").len(), 1);
        assert_eq!(filter_rows(&rows, "sumber").len(), 2);
        assert_eq!(filter_rows(&rows, "talu").len(), 1);
        assert!(filter_rows(&rows, "zzz").is_empty());
    }

    #[test]
    fn test_pagination_boundaries() {
        let mut p = Pagination::new(23, PAGE_SIZE);
        assert_eq!(p.total_pages(), 3);
        assert_eq!(p.range(), 0..10);
        assert!(!p.has_prev());
        p.prev();
        assert_eq!(p.page, 1);
        p.next();
        p.next();
        assert_eq!(p.range(), 20..23);
        assert!(!p.has_next());
        p.next();
        assert_eq!(p.page, 3);
        assert_eq!(p.label(), "Halaman 3 dari 3");
    }

    #[test]
    fn test_pagination_empty_and_shrink() {
        let p = Pagination::new(0, PAGE_SIZE);
        assert_eq!(p.total_pages(), 0);
        assert_eq!(p.range(), 0..0);
        assert!(!p.has_next());
        assert_eq!(p.label(), "Halaman 1 dari 1");

        let mut p = Pagination::new(35, PAGE_SIZE);
        p.next();
        p.next();
        p.next();
        assert_eq!(p.page, 4);
        p.set_total(12);
        assert_eq!(p.page, 2);
        assert_eq!(p.range(), 10..12);
    }
}

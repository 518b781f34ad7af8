use crate::commands::{CmdResult, PageInfo};
use crate::error::Result;
use crate::table::TableController;

/// Lists one page of the table in its current sort.
pub fn run(table: &TableController, page: usize) -> Result<CmdResult> {
    let page = table.page(page);
    let info = PageInfo {
        number: page.number,
        total_pages: page.total_pages,
        total_rows: page.total_rows,
    };
    let rows = page.rows.into_iter().cloned().collect();
    Ok(CmdResult::default().with_listed_records(rows, info))
}

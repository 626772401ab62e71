//! Page-strip math for the presentational pager: which page numbers to show
//! and where the ellipses go.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

pub fn total_pages(count: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    ((count + limit as u64 - 1) / limit as u64) as u32
}

/// Page strip for the pager. Five or fewer pages show in full; otherwise a
/// four-page run anchors whichever end the current page is near, and the
/// middle gets a three-page window with ellipses on both sides.
pub fn page_items(current: u32, total: u32) -> Vec<PageItem> {
    use PageItem::*;

    if total <= 5 {
        return (1..=total).map(Page).collect();
    }

    if current <= 3 {
        vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(total)]
    } else if current >= total - 2 {
        vec![
            Page(1),
            Ellipsis,
            Page(total - 3),
            Page(total - 2),
            Page(total - 1),
            Page(total),
        ]
    } else {
        vec![
            Page(1),
            Ellipsis,
            Page(current - 1),
            Page(current),
            Page(current + 1),
            Ellipsis,
            Page(total),
        ]
    }
}

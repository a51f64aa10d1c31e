use serde::Deserialize;

/// `?page=N` on listing pages.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    pub count: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
}

impl Paginator {
    pub fn new(count: usize, per_page: usize) -> Self {
        Paginator {
            count,
            per_page: per_page.max(1),
        }
    }

    /// An empty listing still has one (empty) page.
    pub fn num_pages(&self) -> usize {
        self.count.div_ceil(self.per_page).max(1)
    }

    /// Resolves a raw `page` parameter leniently: anything that is not an
    /// integer means the first page, an out-of-range integer the last one.
    pub fn page_number(&self, requested: Option<&str>) -> usize {
        let Some(number) = requested.and_then(|it| it.trim().parse::<i64>().ok()) else {
            return 1;
        };

        let num_pages = self.num_pages();
        match usize::try_from(number) {
            Ok(number) if (1..=num_pages).contains(&number) => number,
            _ => num_pages,
        }
    }

    pub fn offset(&self, number: usize) -> usize {
        (number.max(1) - 1) * self.per_page
    }

    pub fn page<T>(&self, number: usize, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number,
            num_pages: self.num_pages(),
            count: self.count,
        }
    }
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_pages() {
        assert_eq!(Paginator::new(0, 10).num_pages(), 1);
        assert_eq!(Paginator::new(10, 10).num_pages(), 1);
        assert_eq!(Paginator::new(11, 10).num_pages(), 2);
        assert_eq!(Paginator::new(25, 10).num_pages(), 3);
    }

    #[test]
    fn resolves_page_numbers_leniently() {
        let paginator = Paginator::new(25, 10);

        assert_eq!(paginator.page_number(None), 1);
        assert_eq!(paginator.page_number(Some("2")), 2);
        assert_eq!(paginator.page_number(Some(" 3 ")), 3);
        assert_eq!(paginator.page_number(Some("abc")), 1);
        assert_eq!(paginator.page_number(Some("")), 1);
        assert_eq!(paginator.page_number(Some("4")), 3);
        assert_eq!(paginator.page_number(Some("0")), 3);
        assert_eq!(paginator.page_number(Some("-1")), 3);
    }

    #[test]
    fn offsets_follow_page_size() {
        let paginator = Paginator::new(25, 10);

        assert_eq!(paginator.offset(1), 0);
        assert_eq!(paginator.offset(3), 20);

        let page = paginator.page(2, vec![(); 10]);
        assert!(page.has_previous());
        assert!(page.has_next());
        let last = paginator.page(3, vec![(); 5]);
        assert!(!last.has_next());
    }
}

/// Fandom index of one media category, grouped by initial letter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryInfo {
    pub groups: Vec<FandomGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FandomGroup {
    pub name: String,
    pub fandoms: Vec<FandomItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FandomItem {
    pub name: String,
    pub works_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategorySort {
    /// The archive's own letter grouping.
    #[default]
    Alphabetical,
    MostPopular,
    LeastPopular,
}

impl CategoryInfo {
    /// Arranges the index for display. Popularity orders flatten every letter
    /// into a single group; ties keep their alphabetical order.
    pub fn sorted(&self, sort: CategorySort) -> Vec<FandomGroup> {
        let flat = || self.groups.iter().flat_map(|g| g.fandoms.iter().cloned()).collect::<Vec<_>>();
        match sort {
            CategorySort::Alphabetical => self.groups.clone(),
            CategorySort::MostPopular => {
                let mut fandoms = flat();
                fandoms.sort_by(|a, b| b.works_count.cmp(&a.works_count));
                vec![FandomGroup {
                    name: "Most Popular".to_string(),
                    fandoms,
                }]
            },
            CategorySort::LeastPopular => {
                let mut fandoms = flat();
                fandoms.sort_by_key(|f| f.works_count);
                vec![FandomGroup {
                    name: "Least Popular".to_string(),
                    fandoms,
                }]
            },
        }
    }
}

/// One enterable giveaway as read from a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Site-assigned code, submitted as the entry `code`.
    pub id: String,
    pub name: String,
    pub cost: u32,
    /// Placed in the pinned-group block at the top of the page.
    pub is_pinned: bool,
    /// Already entered, or otherwise greyed out by the site.
    pub is_faded: bool,
}

impl Listing {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            is_pinned: false,
            is_faded: false,
        }
    }

    pub fn pinned(mut self) -> Self {
        self.is_pinned = true;
        self
    }

    pub fn faded(mut self) -> Self {
        self.is_faded = true;
        self
    }
}

use std::fmt;

use serde::Deserialize;
use url::Url;

/// Listing-source variant chosen in the run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Variant {
    /// Cycles through [`SPECIAL_CATALOG`] whenever a source runs dry.
    Special,
    All,
    Wishlist,
    Recommended,
    Copies,
    Dlc,
    Group,
    New,
}

/// A concrete search the site can answer with a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingSource {
    All,
    Wishlist,
    Recommended,
    Copies,
    Dlc,
    Group,
    New,
    /// Zero-cost listings only.
    Free,
    /// Listings with a review score of at least the given value.
    Metascore(u8),
}

/// Special-mode stage order.
pub const SPECIAL_CATALOG: [ListingSource; 8] = [
    ListingSource::Free,
    ListingSource::Wishlist,
    ListingSource::Recommended,
    ListingSource::Group,
    ListingSource::Metascore(90),
    ListingSource::Metascore(80),
    ListingSource::Metascore(70),
    ListingSource::All,
];

impl Variant {
    /// Sources visited for this variant, in order.
    pub fn sources(self) -> Vec<ListingSource> {
        match self {
            Variant::Special => SPECIAL_CATALOG.to_vec(),
            Variant::All => vec![ListingSource::All],
            Variant::Wishlist => vec![ListingSource::Wishlist],
            Variant::Recommended => vec![ListingSource::Recommended],
            Variant::Copies => vec![ListingSource::Copies],
            Variant::Dlc => vec![ListingSource::Dlc],
            Variant::Group => vec![ListingSource::Group],
            Variant::New => vec![ListingSource::New],
        }
    }
}

impl ListingSource {
    /// Builds the search URL for one page of this source.
    ///
    /// `point_max` caps listing cost at the current balance. The free source
    /// pins it to zero instead.
    pub fn search_url(self, base: &Url, page: u32, point_max: u32) -> Url {
        let mut url = base.clone();
        url.set_path("/giveaways/search");
        url.set_query(None);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &page.to_string());
            match self {
                ListingSource::All | ListingSource::Free => {}
                ListingSource::Wishlist => {
                    query.append_pair("type", "wishlist");
                }
                ListingSource::Recommended => {
                    query.append_pair("type", "recommended");
                }
                ListingSource::Copies => {
                    query.append_pair("copy_min", "2");
                }
                ListingSource::Dlc => {
                    query.append_pair("dlc", "true");
                }
                ListingSource::Group => {
                    query.append_pair("type", "group");
                }
                ListingSource::New => {
                    query.append_pair("type", "new");
                }
                ListingSource::Metascore(min) => {
                    query.append_pair("metascore_min", &min.to_string());
                }
            }
            let cap = match self {
                ListingSource::Free => 0,
                _ => point_max,
            };
            query.append_pair("point_max", &cap.to_string());
        }
        url
    }
}

impl fmt::Display for ListingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingSource::All => write!(f, "all"),
            ListingSource::Wishlist => write!(f, "wishlist"),
            ListingSource::Recommended => write!(f, "recommended"),
            ListingSource::Copies => write!(f, "multiple copies"),
            ListingSource::Dlc => write!(f, "dlc"),
            ListingSource::Group => write!(f, "group"),
            ListingSource::New => write!(f, "new"),
            ListingSource::Free => write!(f, "free"),
            ListingSource::Metascore(min) => write!(f, "metascore {min}+"),
        }
    }
}

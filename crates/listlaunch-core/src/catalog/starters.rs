/// One built-in catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct StarterDirectory {
    pub name: &'static str,
    pub url: &'static str,
    pub domain_rating: f64,
    pub monthly_traffic: i64,
    pub niches: &'static [&'static str],
    pub is_premium: bool,
    pub notes: Option<&'static str>,
}

/// Directories inserted by a first seed, in catalog order.
pub const STARTER_DIRECTORIES: &[StarterDirectory] = &[
    StarterDirectory {
        name: "Capterra",
        url: "https://www.capterra.com/",
        domain_rating: 93.0,
        monthly_traffic: 4_200_000,
        niches: &["Technology & Software", "Business & B2B"],
        is_premium: true,
        notes: Some("High authority software directory"),
    },
    StarterDirectory {
        name: "Product Hunt",
        url: "https://www.producthunt.com/",
        domain_rating: 90.0,
        monthly_traffic: 32_100_000,
        niches: &["Technology & Software", "AI Assistants"],
        is_premium: false,
        notes: None,
    },
    StarterDirectory {
        name: "Futurepedia",
        url: "https://www.futurepedia.io/",
        domain_rating: 78.0,
        monthly_traffic: 890_000,
        niches: &["AI Assistants & Virtual Agents"],
        is_premium: false,
        notes: None,
    },
    StarterDirectory {
        name: "SaaSworthy",
        url: "https://www.saasworthy.com/",
        domain_rating: 72.0,
        monthly_traffic: 256_000,
        niches: &["Technology & Software"],
        is_premium: false,
        notes: None,
    },
    StarterDirectory {
        name: "GetApp",
        url: "https://www.getapp.com/",
        domain_rating: 88.0,
        monthly_traffic: 3_100_000,
        niches: &["Technology & Software"],
        is_premium: true,
        notes: None,
    },
    StarterDirectory {
        name: "Software Advice",
        url: "https://www.softwareadvice.com/",
        domain_rating: 86.0,
        monthly_traffic: 2_800_000,
        niches: &["Technology & Software"],
        is_premium: true,
        notes: None,
    },
    StarterDirectory {
        name: "There's An AI For That",
        url: "https://theresanaiforthat.com/",
        domain_rating: 71.0,
        monthly_traffic: 420_000,
        niches: &["AI Assistants & Virtual Agents"],
        is_premium: false,
        notes: None,
    },
    StarterDirectory {
        name: "AI Tools Directory",
        url: "https://aitoolsdirectory.com/",
        domain_rating: 65.0,
        monthly_traffic: 180_000,
        niches: &["AI Assistants & Virtual Agents"],
        is_premium: false,
        notes: None,
    },
    StarterDirectory {
        name: "Indie Hackers",
        url: "https://www.indiehackers.com/products",
        domain_rating: 86.0,
        monthly_traffic: 1_200_000,
        niches: &["Community", "Startups"],
        is_premium: false,
        notes: None,
    },
    StarterDirectory {
        name: "BetaList",
        url: "https://betalist.com/",
        domain_rating: 72.0,
        monthly_traffic: 350_000,
        niches: &["Startups", "Early adopters"],
        is_premium: false,
        notes: None,
    },
];

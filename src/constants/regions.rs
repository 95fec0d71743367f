/// Region roles, in the order they are listed to users, with the words that select them
pub const REGIONS: &[(&str, &[&str])] = &[
    ("Africa", &["africa"]),
    (
        "North America",
        &["north america", "usa", "united states", "canada", "mexico", "us", "na"],
    ),
    (
        "South America",
        &["south america", "argentina", "brazil", "chile", "peru", "sa"],
    ),
    (
        "Asia",
        &["asia", "china", "taiwan", "japan", "nihon", "nippon", "korea"],
    ),
    (
        "Europe",
        &[
            "europe", "great britain", "france", "united kingdom", "gb", "uk", "sweden",
            "denmark", "norway", "finland", "scandinavia", "poland", "italy", "germany",
            "russia", "spain", "portugal", "hungary",
        ],
    ),
    (
        "Middle East",
        &["middle east", "middle-east", "mesa", "ksa", "saudi"],
    ),
    ("Oceania", &["oceania", "australia", "zealand", "zeeland"]),
];

/// Name of the punitive region role
pub const ANTARCTICA: &str = "Antarctica";

/// Accepted spellings of Antarctica; anything past the first two is a misspelling
pub const ANTARCTICA_SPELLINGS: &[&str] = &[
    "antarctica",
    "antarctic",
    "antartica",
    "anctartctica",
    "antartic",
    "anarctica",
];

pub const CORRECT_ANTARCTICA_SPELLINGS: usize = 2;

pub const BLACKLIST_ADD_WORDS: &[&str] = &["blacklist", "black", "bl", "ban", "forbid"];

pub const BLACKLIST_REMOVE_WORDS: &[&str] =
    &["unblacklist", "unblack", "unbl", "unban", "unforbid", "allow", "remove"];

pub const LIST_WORDS: &[&str] = &["list", "regions", "available"];

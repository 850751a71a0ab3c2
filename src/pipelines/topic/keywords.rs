//! Fixed keyword lists for topic scoring.
//!
//! Entries are lowercase. Lists may repeat a word and may share words with each other;
//! a shared word scores every topic it appears in. Multi-word phrases are kept as
//! listed even though whitespace tokenization never produces them.

pub(crate) const FUNCTIONALITY_KEYWORDS: &[&str] = &[
    "functioning", "operating", "works", "active", "in use", "impactful", "successful",
    "useful", "practical", "serviceable", "performs", "executes", "carries out", "accomplishes",
    "running", "working", "handy", "dependable", "trustworthy", "consistent", "steady",
    "stable", "streamlined", "productive", "competent", "resourceful", "meets expectations",
    "functions properly", "in order", "beeping", "sounding", "alarming", "ringing", "buzzing",
    "charges", "powers", "energizes", "replenishes", "fills", "connects", "links", "joins",
    "interfaces", "attaches", "smashes", "breaks", "shatters", "crushes", "demolishes",
    "malfunction", "breakdown", "failure", "defect", "glitch", "arrives", "reaches", "comes",
    "shows up", "lands", "sends", "transports", "provides", "brings", "fits", "suits",
    "matches", "aligns", "adapts", "gumagana", "sira", "cuts", "slices", "trims", "shears",
    "chops", "nakaayos", "organized", "arranged", "sorted", "heats", "warms", "boils", "cooks",
    "toasts", "hindi gumagana", "not working", "non-functional", "broken", "lasted", "endured",
    "survived", "remained", "glitches", "bugs", "errors", "issues", "faults", "uses",
    "utilizes", "employs", "applies", "leverages", "nakakapaso", "burns", "overheats", "scalds",
    "correct", "creates", "produces", "generates", "forms", "supports", "aids", "assists",
    "backs", "reinforces", "leaking", "dripping", "seeping", "oozing", "drains", "empties",
    "depletes", "siphons", "handles", "manages", "grips", "maneuvering", "navigating",
    "steering", "guiding", "safe", "secure", "protected", "easy", "simple", "straightforward",
    "effortless", "install", "set up", "mount", "place", "configure", "expands", "enlarges",
    "extends", "grows", "fitting", "suitable", "appropriate", "matching", "performing",
    "maliit", "naka-bubble wrap", "bubble-wrapped", "padded", "protected", "tamang-tama",
    "just right", "well-suited", "magaan", "lightweight", "not heavy", "nag-aano", "acting up",
    "misbehaving", "bura", "erased", "wiped", "removed", "ka-tanggap", "acceptable",
    "hindi magagamit", "unusable", "alarm", "alert", "warning", "siren", "expiration",
    "end date", "expiry", "termination", "frustrating", "irritating", "annoying",
    "exasperating", "replacement", "substitute", "new part", "alternative", "ripped", "torn",
    "shredded", "expire", "run out", "end", "lapse", "deal", "bargain", "offer", "agreement",
    "installed", "mounted", "peephole", "viewer", "window", "observation hole", "fix", "repair",
    "mend", "function", "purpose", "role", "operation", "leak", "escape", "seep", "breach",
    "charging", "powering", "replenishing", "energizing", "operate", "control", "manage", "run",
    "non-filled", "empty", "unfilled", "hollow", "good", "fine", "replace", "substitute",
    "exchange", "swap", "fail", "collapse", "break down", "restore", "firmly",
    "properly adjusted", "correctly set", "well-tuned", "suits needs", "meets requirements",
    "fulfills needs", "battery life", "power duration", "charge lifespan", "effective",
    "functional", "operational", "usable", "efficient", "works as expected", "functioning",
    "beeping", "charges", "connects", "smashes", "malfunction", "arrives", "delivers",
    "operates", "fits", "gumagana", "sira", "cuts", "nakaayos", "heats", "hindi gumagana",
    "lasted", "glitches", "uses", "nakakapaso", "accurate", "makes", "supports", "leaking",
    "drains", "handles", "maneuvering", "safe", "easy", "install", "expands", "fitting",
    "not working", "performing", "maliit", "naka-bubble wrap", "tamang-tama", "magaan",
    "nag-aano", "bura", "ka-tanggap", "hindi magagamit", "alarm", "expiration", "frustrating",
    "replacement", "ripped", "expire", "deal", "installed", "peephole", "fixes",
    "functionality", "leakage", "charging process", "operates smoothly", "replaceable",
    "exchangeable", "substitutable", "fails", "repairable", "fixable", "mendable", "securely",
    "suits needs", "battery life", "defective unit", "handle with care",
];

pub(crate) const QUALITY_KEYWORDS: &[&str] = &[
    "quality", "premium", "top-tier", "luxury", "upscale", "balanced expense", "high-quality",
    "superior", "top-notch", "well-made", "expertly crafted", "well-built", "solid", "sturdy",
    "strong", "tough", "reliable", "dependable", "trustworthy", "consistent", "secure",
    "elegant", "refined", "stylish", "graceful", "excellent", "superb", "outstanding",
    "first-rate", "clear", "distinct", "cleanly", "neatly", "smoothly", "nice", "pleasant",
    "agreeable", "even", "sleek", "polished", "comfortable", "cozy", "impressive", "remarkable",
    "flawless", "perfect", "impeccable", "faultless", "great", "adequate", "beautiful",
    "lovely", "charming", "endearing", "inviting", "captivating", "intriguing", "engaging",
    "compelling", "classy", "sophisticated", "timely", "practical", "relevant", "accurate",
    "detailed", "up-to-date", "new", "recent", "fresh", "genuine", "authentic", "original",
    "true", "unique", "classic", "ageless", "high-grade", "top-quality", "finest", "best",
    "ultimate", "complete", "full", "entire", "finished", "accomplished", "well-maintained",
    "well-protected", "artisanal", "handcrafted", "handmade", "design", "plan", "style",
    "layout", "interesting", "pleasant", "delightful", "stunning", "striking", "credible",
    "sharp", "perceptive", "acute", "tapered", "delicate", "fragile", "brittle", "weak",
    "flimsy", "low-quality", "poor", "subpar", "inadequate", "insufficient", "deficient",
    "damaged", "broken", "faulty", "flawed", "ruined", "shattered", "unfit", "unsuitable",
    "inappropriate", "shoddy", "substandard", "inexpensive resources", "cheap materials",
    "low-cost materials", "material", "material feels cheap", "durable", "matibay",
];

pub(crate) const PRICE_KEYWORDS: &[&str] = &[
    "affordable", "economical", "reasonable", "budget-friendly", "cost-effective",
    "value for money", "inexpensive", "expensive", "costly", "high-priced", "overpriced",
    "pricey", "exorbitant", "lavish", "upscale", "extravagant", "steep", "excessively high",
    "high-end", "deals and discounts", "bargain", "deal", "steal", "offer", "discounted",
    "reduced", "marked down", "on sale", "fair", "moderate", "pricing and cost", "price",
    "cost", "rate", "value", "fee", "charge", "price point", "cost level", "pricing",
    "balanced expense", "justifiable cost", "worth", "worthwhile", "justifiable", "top-tier",
    "efficiency", "efficient", "good deal", "abot-kaya", "matipid", "makatarungan",
    "maganda ang halaga", "mura", "mahal", "magastos", "mataas ang presyo", "sobra sa presyo",
    "mataas na presyo", "masyadong mahal", "maluhong", "magarbo", "matindi ang presyo",
    "kasunduan", "abot-kayang presyo", "alok", "may diskwento", "nabawasan",
    "binawasan ang presyo", "nasa sale", "katamtaman", "presyo", "gastos", "halaga", "bayad",
    "singil", "presyo ng produkto", "antas ng gastos", "pagpepresyo", "sulit",
];

//! Keyword and skill extraction against curated industry dictionaries

use crate::error::{AtsInsightError, Result};
use aho_corasick::AhoCorasick;
use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Keyword matcher with static dictionaries built once at startup.
///
/// Everything here is read-only after construction, so a single matcher can
/// be shared across any number of concurrent analyses.
pub struct KeywordMatcher {
    stop_words: HashSet<String>,
    technical_terms: HashMap<String, Vec<String>>,
    known_phrases: HashSet<String>,
    phrase_matcher: AhoCorasick,
    phrase_patterns: Vec<String>,
    skill_matcher: AhoCorasick,
    skill_patterns: Vec<String>,
    industry_keyword_map: HashMap<String, Vec<String>>,
    priority_map: HashMap<String, SkillPriorities>,
    soft_skill_regexes: Vec<Regex>,
    role_phrase_regexes: Vec<Regex>,
    cleanup_regex: Regex,
    whitespace_regex: Regex,
}

/// Per-industry skill tiers used to rank missing skills
#[derive(Debug, Clone, Default)]
pub struct SkillPriorities {
    pub critical: Vec<String>,
    pub important: Vec<String>,
    pub nice_to_have: Vec<String>,
}

impl KeywordMatcher {
    pub fn new() -> Result<Self> {
        let technical_terms = technical_keyword_table();
        let industry_keyword_map = industry_keyword_table();

        // Multi-word curated phrases are matched as substrings; single words
        // come in through tokenization instead.
        let mut known_phrases: HashSet<String> = HashSet::new();
        for terms in technical_terms.values() {
            known_phrases.extend(terms.iter().cloned());
        }
        for terms in industry_keyword_map.values() {
            known_phrases.extend(terms.iter().cloned());
        }

        let mut phrase_patterns: Vec<String> = known_phrases
            .iter()
            .filter(|term| term.contains(' '))
            .cloned()
            .collect();
        phrase_patterns.sort();

        let phrase_matcher = build_matcher(&phrase_patterns)?;

        let mut skill_patterns: Vec<String> = technical_terms
            .values()
            .flat_map(|terms| terms.iter().cloned())
            .collect();
        skill_patterns.sort();
        skill_patterns.dedup();

        let skill_matcher = build_matcher(&skill_patterns)?;

        let soft_skill_regexes = vec![
            Regex::new(r"\b(communication|leadership|teamwork|problem.solving|analytical|creative|detail.oriented)\b")
                .expect("invalid soft skill regex"),
            Regex::new(r"\b(time.management|project.management|critical.thinking|adaptability)\b")
                .expect("invalid soft skill regex"),
            Regex::new(r"\b(collaboration|interpersonal|presentation|negotiation|conflict.resolution)\b")
                .expect("invalid soft skill regex"),
        ];

        let role_phrase_regexes = vec![
            Regex::new(r"\b\w+\s+(development|programming|management|analysis|design)\b")
                .expect("invalid role phrase regex"),
            Regex::new(r"\b(web|mobile|software|data|system)\s+\w+\b")
                .expect("invalid role phrase regex"),
            Regex::new(r"\b\w+\s+(engineer|developer|analyst|manager|specialist)\b")
                .expect("invalid role phrase regex"),
        ];

        Ok(Self {
            stop_words: stop_word_set(),
            technical_terms,
            known_phrases,
            phrase_matcher,
            phrase_patterns,
            skill_matcher,
            skill_patterns,
            industry_keyword_map,
            priority_map: skill_priority_table(),
            soft_skill_regexes,
            role_phrase_regexes,
            cleanup_regex: Regex::new(r"[^\w\s-]").expect("invalid cleanup regex"),
            whitespace_regex: Regex::new(r"\s+").expect("invalid whitespace regex"),
        })
    }

    /// Extract the set of normalized keywords and curated phrases from text.
    /// Empty input yields an empty set; this never fails.
    pub fn extract_keywords(&self, text: &str) -> BTreeSet<String> {
        let mut keywords = BTreeSet::new();
        if text.trim().is_empty() {
            return keywords;
        }

        let cleaned = self.normalize(text);

        // Curated multi-word phrases found anywhere in the text
        for mat in self.phrase_matcher.find_iter(&cleaned) {
            if has_word_boundaries(&cleaned, mat.start(), mat.end()) {
                keywords.insert(self.phrase_patterns[mat.pattern().as_usize()].clone());
            }
        }

        // Single meaningful tokens
        let words: Vec<&str> = cleaned.split_whitespace().collect();
        for word in &words {
            if self.is_meaningful_token(word) {
                keywords.insert((*word).to_string());
            }
        }

        // Compound terms assembled from adjacent tokens
        for window in words.windows(2) {
            let bigram = format!("{} {}", window[0], window[1]);
            if self.is_relevant_phrase(&bigram) {
                keywords.insert(bigram);
            }
        }
        for window in words.windows(3) {
            let trigram = format!("{} {} {}", window[0], window[1], window[2]);
            if self.is_relevant_phrase(&trigram) {
                keywords.insert(trigram);
            }
        }

        keywords
    }

    /// Extract skill terms from free text: a word-boundary scan of the
    /// technical dictionary plus soft-skill pattern matches
    pub fn extract_skills_from_text(&self, text: &str) -> BTreeSet<String> {
        let mut skills = BTreeSet::new();
        if text.trim().is_empty() {
            return skills;
        }

        let text_lower = text.to_lowercase();

        for mat in self.skill_matcher.find_iter(&text_lower) {
            if has_word_boundaries(&text_lower, mat.start(), mat.end()) {
                skills.insert(self.skill_patterns[mat.pattern().as_usize()].clone());
            }
        }

        for pattern in &self.soft_skill_regexes {
            for captures in pattern.captures_iter(&text_lower) {
                if let Some(matched) = captures.get(1) {
                    skills.insert(matched.as_str().to_string());
                }
            }
        }

        skills
    }

    /// Keywords associated with an industry; unknown industries yield nothing
    pub fn industry_keywords(&self, industry: &str) -> Vec<String> {
        self.industry_keyword_map
            .get(&industry.trim().to_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    /// Skills expected for an industry, combining the technical dictionary
    /// slices relevant to it with its keyword list
    pub fn industry_skills(&self, industry: &str) -> BTreeSet<String> {
        let industry_lower = industry.trim().to_lowercase();
        let mut skills: BTreeSet<String> = BTreeSet::new();

        match industry_lower.as_str() {
            "technology" => {
                for category in [
                    "programming_languages",
                    "frameworks",
                    "databases",
                    "cloud_platforms",
                    "devops_tools",
                ] {
                    if let Some(terms) = self.technical_terms.get(category) {
                        skills.extend(terms.iter().cloned());
                    }
                }
            }
            "healthcare" => {
                skills.extend(
                    ["medical terminology", "patient care", "clinical documentation", "hipaa compliance"]
                        .iter()
                        .map(|s| s.to_string()),
                );
            }
            "finance" => {
                skills.extend(
                    ["financial modeling", "excel", "bloomberg terminal", "risk analysis"]
                        .iter()
                        .map(|s| s.to_string()),
                );
            }
            _ => {}
        }

        skills.extend(self.industry_keywords(&industry_lower));
        skills
    }

    /// Skill priority tiers for an industry; unknown industries get empty tiers
    pub fn skill_priorities(&self, industry: &str) -> SkillPriorities {
        self.priority_map
            .get(&industry.trim().to_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    /// Keyword density as a percentage of total words
    pub fn keyword_density(keyword_count: usize, word_count: usize) -> f64 {
        if word_count == 0 {
            return 0.0;
        }
        keyword_count as f64 / word_count as f64 * 100.0
    }

    fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let cleaned = self.cleanup_regex.replace_all(&lowered, " ");
        self.whitespace_regex
            .replace_all(cleaned.trim(), " ")
            .to_string()
    }

    fn is_meaningful_token(&self, word: &str) -> bool {
        word.len() > 2
            && !self.stop_words.contains(word)
            && !word.chars().all(|c| c.is_ascii_digit())
            && word.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
            && word.chars().any(|c| c.is_ascii_alphabetic())
    }

    fn is_relevant_phrase(&self, phrase: &str) -> bool {
        if self.known_phrases.contains(phrase) {
            return true;
        }
        self.role_phrase_regexes
            .iter()
            .any(|pattern| pattern.is_match(phrase))
    }
}

fn build_matcher(patterns: &[String]) -> Result<AhoCorasick> {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .match_kind(aho_corasick::MatchKind::LeftmostLongest)
        .build(patterns)
        .map_err(|e| AtsInsightError::AnalysisFailed(format!("Failed to build keyword matcher: {}", e)))
}

/// A dictionary hit only counts when it is not embedded in a larger word;
/// otherwise "go" would match inside "django"
fn has_word_boundaries(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();
    let before_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
    let after_ok = end >= bytes.len() || !bytes[end].is_ascii_alphanumeric();
    before_ok && after_ok
}

fn stop_word_set() -> HashSet<String> {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
        "of", "with", "by", "from", "up", "about", "into", "through", "during",
        "before", "after", "above", "below", "between", "among",
        "is", "was", "are", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might",
        "can", "must", "shall", "this", "that", "these", "those", "i", "you",
        "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn technical_keyword_table() -> HashMap<String, Vec<String>> {
    let categories: [(&str, &[&str]); 9] = [
        (
            "programming_languages",
            &[
                "python", "java", "javascript", "typescript", "c++", "c#", "ruby", "php", "go",
                "rust", "swift", "kotlin", "scala", "r", "matlab", "sql", "html", "css", "dart",
                "perl",
            ],
        ),
        (
            "frameworks",
            &[
                "react", "angular", "vue", "django", "flask", "spring", "express", "nodejs",
                "laravel", "rails", "asp.net", "bootstrap", "jquery", "ember", "backbone",
                "next.js", "nuxt.js",
            ],
        ),
        (
            "databases",
            &[
                "mysql", "postgresql", "mongodb", "redis", "cassandra", "elasticsearch",
                "dynamodb", "oracle", "sqlite", "mariadb", "couchdb", "neo4j", "influxdb",
                "snowflake",
            ],
        ),
        (
            "cloud_platforms",
            &[
                "aws", "azure", "gcp", "google cloud", "amazon web services", "microsoft azure",
                "digitalocean", "heroku", "vercel", "netlify", "cloudflare", "oracle cloud",
            ],
        ),
        (
            "devops_tools",
            &[
                "docker", "kubernetes", "jenkins", "gitlab", "github", "terraform", "ansible",
                "chef", "puppet", "vagrant", "circleci", "travis ci", "bamboo", "octopus deploy",
            ],
        ),
        (
            "data_science",
            &[
                "machine learning", "artificial intelligence", "deep learning", "neural networks",
                "pandas", "numpy", "scikit-learn", "tensorflow", "pytorch", "keras", "spark",
                "hadoop", "tableau", "power bi", "excel", "statistics", "data analysis",
            ],
        ),
        (
            "security",
            &[
                "cybersecurity", "information security", "penetration testing",
                "vulnerability assessment", "encryption", "firewall", "antivirus", "malware",
                "phishing", "ssl", "tls", "oauth",
            ],
        ),
        (
            "mobile",
            &[
                "ios", "android", "react native", "flutter", "xamarin", "cordova", "phonegap",
                "swift", "objective-c", "java", "kotlin", "mobile development",
            ],
        ),
        (
            "testing",
            &[
                "unit testing", "integration testing", "automated testing", "selenium", "cypress",
                "jest", "mocha", "pytest", "junit", "testng", "cucumber", "postman",
            ],
        ),
    ];

    categories
        .iter()
        .map(|(name, terms)| {
            (
                name.to_string(),
                terms.iter().map(|t| t.to_string()).collect(),
            )
        })
        .collect()
}

fn industry_keyword_table() -> HashMap<String, Vec<String>> {
    let industries: [(&str, &[&str]); 8] = [
        (
            "technology",
            &[
                "software development", "agile", "scrum", "devops", "microservices", "api",
                "rest", "graphql", "cloud computing", "serverless", "containerization", "ci/cd",
                "git", "version control", "code review", "technical documentation",
                "system architecture", "scalability", "performance optimization", "debugging",
                "troubleshooting",
            ],
        ),
        (
            "healthcare",
            &[
                "patient care", "clinical experience", "medical records", "hipaa", "ehr", "emr",
                "healthcare", "nursing", "pharmacy", "radiology", "laboratory", "diagnosis",
                "treatment", "medication", "surgery", "rehabilitation", "telemedicine",
                "medical devices", "clinical trials", "healthcare administration",
            ],
        ),
        (
            "finance",
            &[
                "financial analysis", "investment", "portfolio management", "risk management",
                "compliance", "audit", "accounting", "budgeting", "forecasting", "valuation",
                "derivatives", "securities", "banking", "insurance", "fintech", "blockchain",
                "cryptocurrency", "trading", "wealth management", "financial modeling",
            ],
        ),
        (
            "marketing",
            &[
                "digital marketing", "seo", "sem", "social media", "content marketing",
                "email marketing", "ppc", "analytics", "conversion optimization",
                "brand management", "campaign management", "market research",
                "customer acquisition", "lead generation", "crm", "marketing automation",
            ],
        ),
        (
            "sales",
            &[
                "sales development", "lead generation", "prospecting", "closing", "negotiation",
                "relationship building", "crm", "pipeline management", "quota attainment",
                "customer retention", "upselling", "cross-selling", "territory management",
                "account management", "sales forecasting", "sales training",
            ],
        ),
        (
            "education",
            &[
                "curriculum development", "lesson planning", "classroom management",
                "student assessment", "educational technology", "learning management systems",
                "pedagogy", "instructional design", "differentiated instruction",
                "special education", "esl", "standardized testing", "parent communication",
                "professional development",
            ],
        ),
        (
            "manufacturing",
            &[
                "lean manufacturing", "six sigma", "quality control", "supply chain",
                "inventory management", "production planning", "process improvement",
                "safety protocols", "equipment maintenance", "iso standards",
                "continuous improvement", "waste reduction", "efficiency optimization",
            ],
        ),
        (
            "consulting",
            &[
                "client management", "project management", "stakeholder engagement",
                "business analysis", "process improvement", "change management",
                "strategic planning", "problem solving", "presentation skills",
                "client relations", "proposal writing", "requirement gathering",
            ],
        ),
    ];

    industries
        .iter()
        .map(|(name, terms)| {
            (
                name.to_string(),
                terms.iter().map(|t| t.to_string()).collect(),
            )
        })
        .collect()
}

fn skill_priority_table() -> HashMap<String, SkillPriorities> {
    let mut priorities = HashMap::new();

    priorities.insert(
        "technology".to_string(),
        SkillPriorities {
            critical: to_strings(&["programming", "software development", "problem solving", "debugging"]),
            important: to_strings(&["version control", "testing", "agile", "collaboration"]),
            nice_to_have: to_strings(&["devops", "cloud", "machine learning", "mobile development"]),
        },
    );
    priorities.insert(
        "healthcare".to_string(),
        SkillPriorities {
            critical: to_strings(&["patient care", "clinical skills", "medical knowledge", "communication"]),
            important: to_strings(&["teamwork", "attention to detail", "empathy", "time management"]),
            nice_to_have: to_strings(&["technology skills", "research", "leadership", "teaching"]),
        },
    );
    priorities.insert(
        "finance".to_string(),
        SkillPriorities {
            critical: to_strings(&["financial analysis", "excel", "analytical thinking", "attention to detail"]),
            important: to_strings(&["communication", "teamwork", "time management", "presentation skills"]),
            nice_to_have: to_strings(&["programming", "data visualization", "project management", "leadership"]),
        },
    );

    priorities
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

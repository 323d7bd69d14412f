//! Finds dictionary skills mentioned in free text such as a resume.
//!
//! Matching is case-insensitive and letter-bounded: a skill counts when the
//! characters around it are not ASCII letters, so "java" does not fire inside
//! "javascript" but "c" does fire in "c, c++".

use std::sync::LazyLock;

use regex::Regex;

/// Skills recognised in resume text.
pub const SKILL_DICTIONARY: &[&str] = &[
    // Languages
    "javascript", "typescript", "python", "java", "c", "c++", "c#", "ruby", "go", "golang",
    "rust", "swift", "kotlin", "php", "perl", "scala", "r", "matlab", "dart", "lua",
    "objective-c", "shell", "bash", "powershell", "solidity", "haskell", "elixir", "clojure",
    // Frontend
    "html", "html5", "css", "css3", "sass", "scss", "less", "tailwindcss", "tailwind",
    "bootstrap", "react", "reactjs", "react.js", "redux", "next.js", "nextjs",
    "vue", "vuejs", "vue.js", "nuxt", "nuxtjs", "angular", "angularjs", "svelte",
    "jquery", "webpack", "vite", "babel", "eslint", "prettier",
    // Backend
    "node", "nodejs", "node.js", "express", "expressjs", "nestjs", "fastify",
    "django", "flask", "fastapi", "spring", "spring boot", "springboot",
    "rails", "ruby on rails", "laravel", "asp.net", ".net", "dotnet",
    // Databases
    "sql", "mysql", "postgresql", "postgres", "sqlite", "mongodb", "mongoose",
    "redis", "firebase", "firestore", "dynamodb", "cassandra", "couchdb",
    "mariadb", "oracle", "neo4j", "graphql", "prisma", "sequelize",
    // Cloud & DevOps
    "aws", "amazon web services", "azure", "gcp", "google cloud", "heroku",
    "docker", "kubernetes", "k8s", "terraform", "ansible", "jenkins",
    "ci/cd", "github actions", "gitlab ci", "circleci", "nginx", "apache",
    "linux", "unix", "devops", "cloudflare", "vercel", "netlify",
    // Data & ML
    "machine learning", "deep learning", "artificial intelligence", "ai", "ml",
    "nlp", "natural language processing", "computer vision", "opencv",
    "tensorflow", "pytorch", "keras", "scikit-learn", "sklearn", "pandas",
    "numpy", "scipy", "matplotlib", "seaborn", "jupyter", "data science",
    "data analysis", "data analytics", "data visualization", "tableau", "power bi",
    "big data", "hadoop", "spark", "apache spark", "etl", "data engineering",
    "statistics", "regression", "classification", "clustering", "neural networks",
    // Mobile
    "android", "ios", "react native", "flutter", "swiftui",
    "xamarin", "ionic", "cordova", "expo",
    // Tools
    "git", "github", "gitlab", "bitbucket", "svn", "jira", "trello",
    "slack", "confluence", "figma", "sketch", "adobe xd", "postman",
    "swagger", "insomnia", "vs code", "vim",
    // Testing
    "jest", "mocha", "chai", "cypress", "selenium", "puppeteer", "playwright",
    "junit", "pytest", "testing", "unit testing", "integration testing",
    "test driven development", "tdd", "bdd",
    // Other
    "rest", "rest api", "restful", "api", "microservices", "websocket", "socket.io",
    "oauth", "jwt", "authentication", "authorization", "security",
    "agile", "scrum", "kanban", "project management",
    "blockchain", "web3", "ethereum", "smart contracts",
    "ux", "ui", "ux design", "ui design", "responsive design",
    "seo", "accessibility", "a11y", "performance", "optimization",
    "windows", "macos",
    "excel", "word", "powerpoint",
    "communication", "teamwork", "leadership", "problem solving",
];

struct SkillPattern {
    skill: &'static str,
    pattern: Regex,
}

// Longest first so multi-word skills are reported ahead of their fragments.
static PATTERNS: LazyLock<Vec<SkillPattern>> = LazyLock::new(|| {
    let mut skills: Vec<&'static str> = SKILL_DICTIONARY.to_vec();
    skills.sort_by_key(|s| std::cmp::Reverse(s.len()));
    skills
        .into_iter()
        .filter_map(|skill| {
            let source = format!("(?:^|[^a-z]){}(?:$|[^a-z])", regex::escape(skill));
            Regex::new(&source)
                .ok()
                .map(|pattern| SkillPattern { skill, pattern })
        })
        .collect()
});

/// Returns every dictionary skill found in `text`, lower-cased and unique,
/// longest skills first. Empty text yields nothing.
pub fn extract_skills_from_text(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return vec![];
    }
    let lower = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();
    for SkillPattern { skill, pattern } in PATTERNS.iter() {
        if pattern.is_match(&lower) && !found.iter().any(|f| f == skill) {
            found.push(skill.to_string());
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_skills_case_insensitively() {
        let skills = extract_skills_from_text("Built services in Rust and PostgreSQL, deployed with Docker.");
        assert!(skills.contains(&"rust".to_string()));
        assert!(skills.contains(&"postgresql".to_string()));
        assert!(skills.contains(&"docker".to_string()));
    }

    #[test]
    fn test_letter_boundaries() {
        let skills = extract_skills_from_text("Senior JavaScript developer");
        assert!(skills.contains(&"javascript".to_string()));
        assert!(!skills.contains(&"java".to_string()));
    }

    #[test]
    fn test_symbol_skills() {
        let skills = extract_skills_from_text("Languages: C++, C#, Node.js");
        assert!(skills.contains(&"c++".to_string()));
        assert!(skills.contains(&"c#".to_string()));
        assert!(skills.contains(&"node.js".to_string()));
    }

    #[test]
    fn test_multi_word_reported_first() {
        let skills = extract_skills_from_text("Interested in machine learning");
        assert_eq!(skills.first().map(String::as_str), Some("machine learning"));
        assert!(!skills.contains(&"ml".to_string()));
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_skills_from_text("").is_empty());
        assert!(extract_skills_from_text("   ").is_empty());
    }

    #[test]
    fn test_results_are_unique() {
        let skills = extract_skills_from_text("rust rust RUST");
        assert_eq!(skills.iter().filter(|s| *s == "rust").count(), 1);
    }
}

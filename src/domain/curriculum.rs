//! Fixed curriculum tables and the deterministic fallback schedule generator.
//!
//! Used when the remote model's reply yields no parseable schedule lines.
//! Keyword matching is a prioritized list evaluated in a fixed order,
//! first match wins.

use chrono::{Days, NaiveDate};

use crate::domain::ScheduleEntry;

/// Per-topic learning objective and practice exercise.
#[derive(Debug, Clone, Copy)]
pub struct Lesson {
    pub objective: &'static str,
    pub exercise: &'static str,
}

/// Known-domain topic lists, matched against the lowercased goal title.
/// Order matters: first keyword contained in the title wins.
const DOMAIN_TOPICS: &[(&str, &[&str])] = &[
    ("python", PYTHON_TOPICS),
    ("javascript", JAVASCRIPT_TOPICS),
    ("web development", WEB_DEV_TOPICS),
    ("machine learning", ML_TOPICS),
];

const PYTHON_TOPICS: &[&str] = &[
    "Basic syntax",
    "Variables and data types",
    "Control flow",
    "Functions",
    "Data structures",
    "File handling",
    "Error handling",
    "Object-oriented programming",
    "Modules and packages",
    "Advanced functions",
    "Working with APIs",
    "Testing",
    "Web frameworks",
    "List comprehensions",
    "Decorators",
    "Generators and iterators",
    "Context managers",
    "Lambda expressions",
    "Regular expressions",
    "Python for data analysis",
    "Python for automation",
    "Multithreading",
    "Multiprocessing",
    "Async programming",
    "Working with databases",
    "Web scraping",
    "Python socket programming",
    "Building CLI applications",
    "GUI development with Tkinter",
    "Python with cloud services",
    "Pandas",
    "NumPy",
    "Matplotlib",
    "Scikit-learn",
    "Django",
    "Flask",
    "FastAPI",
];

const JAVASCRIPT_TOPICS: &[&str] = &[
    "Basic syntax",
    "Variables and data types",
    "Control flow",
    "Functions",
    "Arrays and objects",
    "DOM manipulation",
    "Events",
    "Asynchronous JS",
    "Error handling",
    "ES6 features",
    "Modules",
    "Frameworks introduction",
    "API integration",
];

const WEB_DEV_TOPICS: &[&str] = &[
    "HTML basics",
    "CSS fundamentals",
    "Layout techniques",
    "Responsive design",
    "JavaScript basics",
    "DOM manipulation",
    "Forms and validation",
    "API integration",
    "Frontend frameworks intro",
    "Backend basics",
    "Databases",
    "Authentication",
    "Deployment",
];

const ML_TOPICS: &[&str] = &[
    "Data preparation",
    "Basic statistics",
    "Linear regression",
    "Classification algorithms",
    "Model evaluation",
    "Feature engineering",
    "Decision trees",
    "Neural networks intro",
    "Python ML libraries",
    "Model optimization",
    "Clustering",
    "Natural language processing",
    "Computer vision",
];

/// Detailed objectives and exercises for the Python topic table.
/// Unmapped topics fall back to synthesized text, see [`lesson_for`].
const LESSONS: &[(&str, Lesson)] = &[
    (
        "Basic syntax",
        Lesson {
            objective: "Learn Python's indentation rules, comments, and basic operators",
            exercise:
                "Write a program that prints 'Hello, World!' and calculates simple math expressions",
        },
    ),
    (
        "Variables and data types",
        Lesson {
            objective:
                "Understand different data types (int, float, string, bool) and type conversion",
            exercise: "Create variables of different types and perform operations on them",
        },
    ),
    (
        "Control flow",
        Lesson {
            objective: "Master if-else statements, loops, and conditional expressions",
            exercise:
                "Write a program that determines if a number is prime using conditionals and loops",
        },
    ),
    (
        "Functions",
        Lesson {
            objective:
                "Create and use functions with parameters, return values, and default arguments",
            exercise: "Create a function to calculate the factorial of a number",
        },
    ),
    (
        "Data structures",
        Lesson {
            objective: "Work with lists, dictionaries, tuples, and sets",
            exercise:
                "Build a contact list using dictionaries with operations to add, remove, and search",
        },
    ),
    (
        "File handling",
        Lesson {
            objective: "Open, read, write, and close files using different modes",
            exercise:
                "Create a program that reads a CSV file, processes data, and writes results to a new file",
        },
    ),
    (
        "Error handling",
        Lesson {
            objective: "Implement try-except blocks to handle exceptions gracefully",
            exercise: "Write a program that safely divides numbers and handles potential errors",
        },
    ),
    (
        "Object-oriented programming",
        Lesson {
            objective: "Create classes, objects, inheritance, and use special methods",
            exercise:
                "Design a 'Bank Account' class with methods for deposit, withdrawal, and balance check",
        },
    ),
    (
        "Modules and packages",
        Lesson {
            objective: "Import and use modules, create your own modules",
            exercise: "Create a module with utility functions and import it in a main script",
        },
    ),
    (
        "Advanced functions",
        Lesson {
            objective: "Explore higher-order functions, closures, and recursion",
            exercise: "Implement a decorator that times how long a function takes to execute",
        },
    ),
    (
        "Working with APIs",
        Lesson {
            objective: "Make HTTP requests and parse JSON responses",
            exercise: "Build a weather app that fetches data from a public API",
        },
    ),
    (
        "Testing",
        Lesson {
            objective: "Write unit tests using pytest or unittest",
            exercise: "Write tests for the 'Bank Account' class created earlier",
        },
    ),
    (
        "Web frameworks",
        Lesson {
            objective: "Build a simple web application with Flask",
            exercise: "Create a simple Flask application with routes and templates",
        },
    ),
    (
        "List comprehensions",
        Lesson {
            objective:
                "Write concise code for creating lists with conditions and transformations",
            exercise: "Convert for loops to list comprehensions in various examples",
        },
    ),
    (
        "Decorators",
        Lesson {
            objective: "Modify function behavior with decorator functions",
            exercise: "Create a caching decorator for expensive function calls",
        },
    ),
    (
        "Generators and iterators",
        Lesson {
            objective: "Create memory-efficient sequences using generator functions",
            exercise: "Implement a custom range function using generators",
        },
    ),
    (
        "Context managers",
        Lesson {
            objective: "Implement resource management with context managers",
            exercise: "Create a custom context manager for file handling",
        },
    ),
    (
        "Lambda expressions",
        Lesson {
            objective: "Write anonymous functions for simple operations",
            exercise: "Use lambda functions with map, filter, and sort",
        },
    ),
    (
        "Regular expressions",
        Lesson {
            objective: "Parse and validate text using regex patterns",
            exercise: "Build an email validator using regex",
        },
    ),
    (
        "Python for data analysis",
        Lesson {
            objective: "Process data using pandas DataFrames",
            exercise: "Clean and analyze a sample dataset",
        },
    ),
    (
        "Python for automation",
        Lesson {
            objective: "Automate tasks with scripts",
            exercise: "Create a script that organizes files in a directory by type",
        },
    ),
    (
        "Multithreading",
        Lesson {
            objective: "Run code concurrently with threads",
            exercise: "Build a program that downloads multiple files concurrently",
        },
    ),
    (
        "Multiprocessing",
        Lesson {
            objective: "Execute tasks in parallel using multiple CPU cores",
            exercise: "Process a large dataset in parallel",
        },
    ),
    (
        "Async programming",
        Lesson {
            objective: "Use async/await for non-blocking code execution",
            exercise: "Create an async web scraper",
        },
    ),
    (
        "Working with databases",
        Lesson {
            objective: "Connect to SQL databases and execute queries",
            exercise: "Build a simple contact management system with SQLite",
        },
    ),
    (
        "Web scraping",
        Lesson {
            objective: "Extract data from websites using BeautifulSoup or Scrapy",
            exercise: "Extract data from a news website",
        },
    ),
    (
        "Python socket programming",
        Lesson {
            objective: "Create client-server applications",
            exercise: "Create a simple chat application",
        },
    ),
    (
        "Building CLI applications",
        Lesson {
            objective: "Design command-line interfaces with argparse",
            exercise: "Build a command-line todo list manager",
        },
    ),
    (
        "GUI development with Tkinter",
        Lesson {
            objective: "Build desktop applications with Python's built-in GUI toolkit",
            exercise: "Create a calculator application with GUI",
        },
    ),
    (
        "Python with cloud services",
        Lesson {
            objective: "Integrate with AWS, Azure, or Google Cloud",
            exercise: "Upload files to S3 or similar service",
        },
    ),
    (
        "Pandas",
        Lesson {
            objective: "Analyze and manipulate tabular data efficiently",
            exercise: "Analyze and visualize real-world dataset",
        },
    ),
    (
        "NumPy",
        Lesson {
            objective: "Perform numerical computing with arrays",
            exercise: "Solve mathematical problems using NumPy arrays",
        },
    ),
    (
        "Matplotlib",
        Lesson {
            objective: "Create data visualizations and plots",
            exercise: "Create various charts and plots from sample data",
        },
    ),
    (
        "Scikit-learn",
        Lesson {
            objective: "Build machine learning models with Python",
            exercise: "Build and evaluate a simple classification model",
        },
    ),
    (
        "Django",
        Lesson {
            objective: "Develop full-featured web applications",
            exercise: "Create a blog application with user authentication",
        },
    ),
    (
        "Flask",
        Lesson {
            objective: "Create lightweight web services",
            exercise: "Build a RESTful API",
        },
    ),
    (
        "FastAPI",
        Lesson {
            objective: "Build high-performance APIs with automatic documentation",
            exercise: "Develop a high-performance API with validation",
        },
    ),
];

/// Objective and exercise for `topic`, synthesized generically when the topic
/// has no table entry.
pub fn lesson_for(topic: &str) -> (String, String) {
    match LESSONS.iter().find(|(name, _)| *name == topic) {
        Some((_, lesson)) => (lesson.objective.to_string(), lesson.exercise.to_string()),
        None => (
            format!("Learn the fundamentals of {topic}"),
            format!("Create a simple example demonstrating {topic}"),
        ),
    }
}

/// Select `days_count` topics for a goal title.
///
/// The lowercased title is matched against the domain keywords in priority
/// order. A matched list is truncated to `days_count`, or extended with
/// `Advanced {keyword} topic {n}` labels when shorter. Unmatched titles get
/// generic `{title} - Topic {i}` labels.
pub fn topic_list(goal_title: &str, days_count: usize) -> Vec<String> {
    let goal_lower = goal_title.to_lowercase();

    for (keyword, topics) in DOMAIN_TOPICS {
        if goal_lower.contains(keyword) {
            let mut selected: Vec<String> = topics
                .iter()
                .take(days_count)
                .map(|t| (*t).to_string())
                .collect();
            let mut n = 1;
            while selected.len() < days_count {
                selected.push(format!("Advanced {keyword} topic {n}"));
                n += 1;
            }
            return selected;
        }
    }

    (1..=days_count)
        .map(|i| format!("{goal_title} - Topic {i}"))
        .collect()
}

/// Deterministic schedule: one entry per day over `[start, end]`, pairing
/// each day with the topic at its 1-based index. Returns entries already
/// sorted ascending by date. Empty when `start > end`.
pub fn fallback_schedule(goal_title: &str, start: NaiveDate, end: NaiveDate) -> Vec<ScheduleEntry> {
    if start > end {
        return Vec::new();
    }
    let days_between = (end - start).num_days() as usize + 1;
    let topics = topic_list(goal_title, days_between);

    let mut entries = Vec::with_capacity(days_between);
    let mut current = start;
    for (i, topic) in topics.iter().enumerate() {
        if current > end {
            break;
        }
        let day_count = i + 1;
        let (objective, exercise) = lesson_for(topic);
        let description = format!(
            "Day {day_count}: {topic}\n\
             Objective: {objective}\n\
             Task: Apply {topic} concepts in Python code\n\
             Practice: {exercise}"
        );
        entries.push(ScheduleEntry {
            date: current,
            description,
        });
        current = match current.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn python_title_takes_table_prefix_in_order() {
        let topics = topic_list("Learn Python", 3);
        assert_eq!(
            topics,
            vec!["Basic syntax", "Variables and data types", "Control flow"]
        );
    }

    #[test]
    fn unmatched_title_gets_generic_labels() {
        let topics = topic_list("Underwater Basket Weaving", 2);
        assert_eq!(
            topics,
            vec![
                "Underwater Basket Weaving - Topic 1",
                "Underwater Basket Weaving - Topic 2"
            ]
        );
    }

    #[test]
    fn short_table_extended_with_advanced_labels() {
        // The javascript table has 13 entries.
        let topics = topic_list("Master JavaScript", 15);
        assert_eq!(topics.len(), 15);
        assert_eq!(topics[12], "API integration");
        assert_eq!(topics[13], "Advanced javascript topic 1");
        assert_eq!(topics[14], "Advanced javascript topic 2");
    }

    #[test]
    fn keyword_match_is_case_insensitive_substring() {
        let topics = topic_list("my MACHINE Learning journey", 2);
        assert_eq!(topics, vec!["Data preparation", "Basic statistics"]);
    }

    #[test]
    fn first_keyword_in_priority_order_wins() {
        // Title mentions both python and javascript; python is higher priority.
        let topics = topic_list("python vs javascript", 1);
        assert_eq!(topics, vec!["Basic syntax"]);
        // Python's "Basic syntax" lesson, not a generic one.
        let (objective, _) = lesson_for(&topics[0]);
        assert!(objective.contains("indentation"));
    }

    #[test]
    fn lesson_for_unknown_topic_synthesized() {
        let (objective, exercise) = lesson_for("Knitting - Topic 1");
        assert_eq!(objective, "Learn the fundamentals of Knitting - Topic 1");
        assert_eq!(
            exercise,
            "Create a simple example demonstrating Knitting - Topic 1"
        );
    }

    #[test]
    fn fallback_covers_every_day_once_sorted() {
        let start = date("2024-03-01");
        let end = date("2024-03-05");
        let entries = fallback_schedule("Learn Python", start, end);

        assert_eq!(entries.len(), 5);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.date, start + chrono::Duration::days(i as i64));
        }
    }

    #[test]
    fn fallback_single_day_range() {
        let d = date("2024-03-01");
        let entries = fallback_schedule("Learn Python", d, d);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, d);
        assert!(entries[0].description.starts_with("Day 1: Basic syntax"));
    }

    #[test]
    fn fallback_description_structure() {
        let d = date("2024-03-01");
        let entries = fallback_schedule("Learn Python", d, d);
        let desc = &entries[0].description;
        assert!(desc.contains("Objective: Learn Python's indentation rules"));
        assert!(desc.contains("Task: Apply Basic syntax concepts in Python code"));
        assert!(desc.contains("Practice: Write a program that prints 'Hello, World!'"));
    }

    #[test]
    fn fallback_empty_for_inverted_range() {
        let entries =
            fallback_schedule("Learn Python", date("2024-03-05"), date("2024-03-01"));
        assert!(entries.is_empty());
    }

    #[test]
    fn fallback_beyond_table_length_uses_advanced_labels() {
        let start = date("2024-01-01");
        let end = date("2024-02-09"); // 40 days, python table has 37 topics
        let entries = fallback_schedule("Learn Python", start, end);

        assert_eq!(entries.len(), 40);
        assert!(entries[36].description.contains("Day 37: FastAPI"));
        assert!(entries[37].description.contains("Advanced python topic 1"));
        assert!(entries[39].description.contains("Advanced python topic 3"));
    }
}

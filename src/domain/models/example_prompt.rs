/// A canned prompt offered on the welcome screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamplePrompt {
    pub title: &'static str,
    pub blurb: &'static str,
    pub prompt: &'static str,
}

pub const EXAMPLE_PROMPTS: [ExamplePrompt; 4] = [
    ExamplePrompt {
        title: "Explain a concept",
        blurb: "Understand complex topics like Object-Oriented Programming.",
        prompt: "Explain the main concepts of Object-Oriented Programming (OOP)",
    },
    ExamplePrompt {
        title: "Generate Code",
        blurb: "Create a Python script for a simple countdown timer.",
        prompt: "Generate a simple Python script for a countdown timer",
    },
    ExamplePrompt {
        title: "Compare two things",
        blurb: "Get a structured breakdown of differences between two items.",
        prompt: "Compare Python lists and tuples, explaining their key differences.",
    },
    ExamplePrompt {
        title: "Solve a problem",
        blurb: "Generate a function to check if a word is a palindrome.",
        prompt: "Write a Python function to check if a string is a palindrome.",
    },
];

impl ExamplePrompt {
    /// Look up an example by its 1-based position.
    pub fn by_number(number: usize) -> Option<&'static ExamplePrompt> {
        number.checked_sub(1).and_then(|i| EXAMPLE_PROMPTS.get(i))
    }

    pub fn all() -> &'static [ExamplePrompt] {
        &EXAMPLE_PROMPTS
    }
}

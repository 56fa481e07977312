//! Built-in Python templates.

use crate::editor::EditorSession;

#[derive(Debug)]
pub struct Sample {
    pub key: &'static str,
    pub title: &'static str,
    pub code: &'static str,
}

pub const SAMPLES: &[Sample] = &[
    Sample {
        key: "hello",
        title: "Hello World",
        code: r#"# Hello World Example
print("Hello, World!")
print("Welcome to Python Online Compiler!")"#,
    },
    Sample {
        key: "input",
        title: "Reading input",
        code: r#"# Input Example
name = input("Enter your name: ")
age = input("Enter your age: ")
print(f"Hello {name}! You are {age} years old.")"#,
    },
    Sample {
        key: "loop",
        title: "Loops",
        code: r#"# Loop Example
# Print numbers from 1 to 10
for i in range(1, 11):
    print(f"Number: {i}")

# Calculate sum
total = sum(range(1, 101))
print(f"\nSum of 1 to 100: {total}")"#,
    },
    Sample {
        key: "function",
        title: "Functions",
        code: r#"# Function Example
def greet(name):
    return f"Hello, {name}!"

def calculate_area(radius):
    pi = 3.14159
    return pi * radius ** 2

# Test functions
print(greet("Python"))
print(f"Area of circle (r=5): {calculate_area(5):.2f}")"#,
    },
    Sample {
        key: "list",
        title: "List operations",
        code: r#"# List Operations Example
# Create a list
numbers = [1, 2, 3, 4, 5]
print(f"Original list: {numbers}")

# Add elements
numbers.append(6)
print(f"After append: {numbers}")

# List comprehension
squares = [x**2 for x in numbers]
print(f"Squares: {squares}")

# Filter even numbers
evens = [x for x in numbers if x % 2 == 0]
print(f"Even numbers: {evens}")"#,
    },
];

pub fn get(key: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|s| s.key == key)
}

pub fn keys() -> impl Iterator<Item = &'static str> {
    SAMPLES.iter().map(|s| s.key)
}

/// Replace the editor contents with the template for `key`. Unknown keys leave the editor
/// as it was and return false.
pub fn load_into(key: &str, editor: &mut dyn EditorSession) -> bool {
    match get(key) {
        Some(sample) => {
            editor.set_text(sample.code);
            true
        }
        None => false,
    }
}

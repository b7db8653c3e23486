//! Built-in language table.

use codepad_api::LanguageConfig;

use crate::Registry;

/// Registry of supported languages.
pub type LanguageRegistry = Registry<LanguageConfig>;

impl Registry<LanguageConfig> {
    /// The languages the playground ships with, in selector order.
    pub fn builtin() -> Self {
        Self::from_static(builtin_languages())
    }
}

fn builtin_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            id: "javascript",
            label: "JavaScript",
            syntax_id: "javascript",
            default_code: r#"// JavaScript Playground
const numbers = [1, 2, 3, 4, 5];

// Map numbers to their squares
const squares = numbers.map(n => n * n);
console.log('Original numbers:', numbers);
console.log('Squared numbers:', squares);

// Filter for even numbers
const evenNumbers = numbers.filter(n => n % 2 === 0);
console.log('Even numbers:', evenNumbers);

// Calculate sum using reduce
const sum = numbers.reduce((acc, curr) => acc + curr, 0);
console.log('Sum of numbers:', sum);"#,
            icon_path: "/javascript.png",
            version: "18.15.0",
            description: "Dynamic programming language",
        },
        LanguageConfig {
            id: "typescript",
            label: "TypeScript",
            syntax_id: "typescript",
            default_code: r#"// TypeScript Playground
interface NumberArray {
  numbers: number[];
  sum(): number;
}

const data: NumberArray = {
  numbers: [1, 2, 3, 4, 5],
  sum() {
    return this.numbers.reduce((acc, curr) => acc + curr, 0);
  }
};

console.log('Numbers:', data.numbers);
console.log('Sum:', data.sum());"#,
            icon_path: "/typescript.png",
            version: "5.0.3",
            description: "JavaScript with static typing",
        },
        LanguageConfig {
            id: "python",
            label: "Python",
            syntax_id: "python",
            default_code: r#"# Python Playground
numbers = [1, 2, 3, 4, 5]

squares = [n ** 2 for n in numbers]
print(f"Original numbers: {numbers}")
print(f"Squared numbers: {squares}")

even_numbers = [n for n in numbers if n % 2 == 0]
print(f"Even numbers: {even_numbers}")

print(f"Sum of numbers: {sum(numbers)}")"#,
            icon_path: "/python.png",
            version: "3.10.0",
            description: "High-level programming language",
        },
        LanguageConfig {
            id: "java",
            label: "Java",
            syntax_id: "java",
            default_code: r#"public class Main {
    public static void main(String[] args) {
        int[] numbers = {1, 2, 3, 4, 5};
        int sum = 0;
        for (int n : numbers) {
            sum += n;
        }
        System.out.println("Sum of numbers: " + sum);
    }
}"#,
            icon_path: "/java.png",
            version: "15.0.2",
            description: "Object-oriented programming",
        },
        LanguageConfig {
            id: "go",
            label: "Go",
            syntax_id: "go",
            default_code: r#"package main

import "fmt"

func main() {
	numbers := []int{1, 2, 3, 4, 5}
	sum := 0
	for _, n := range numbers {
		sum += n
	}
	fmt.Println("Sum of numbers:", sum)
}"#,
            icon_path: "/go.png",
            version: "1.16.2",
            description: "Fast and simple language",
        },
        LanguageConfig {
            id: "rust",
            label: "Rust",
            syntax_id: "rust",
            default_code: r#"fn main() {
    let numbers = vec![1, 2, 3, 4, 5];
    let squares: Vec<i32> = numbers.iter().map(|n| n * n).collect();
    println!("Original numbers: {:?}", numbers);
    println!("Squared numbers: {:?}", squares);
    println!("Sum of numbers: {}", numbers.iter().sum::<i32>());
}"#,
            icon_path: "/rust.png",
            version: "1.68.2",
            description: "Memory-safe systems language",
        },
        LanguageConfig {
            id: "cpp",
            label: "C++",
            syntax_id: "cpp",
            default_code: r#"#include <iostream>
#include <vector>
#include <numeric>

int main() {
    std::vector<int> numbers = {1, 2, 3, 4, 5};
    int sum = std::accumulate(numbers.begin(), numbers.end(), 0);
    std::cout << "Sum of numbers: " << sum << std::endl;
    return 0;
}"#,
            icon_path: "/cpp.png",
            version: "10.2.0",
            description: "Systems programming language",
        },
        LanguageConfig {
            id: "csharp",
            label: "C#",
            syntax_id: "csharp",
            default_code: r#"using System;
using System.Linq;

class Program {
    static void Main() {
        var numbers = new[] {1, 2, 3, 4, 5};
        Console.WriteLine($"Sum of numbers: {numbers.Sum()}");
    }
}"#,
            icon_path: "/csharp.png",
            version: "6.12.0",
            description: "Microsoft .NET language",
        },
        LanguageConfig {
            id: "ruby",
            label: "Ruby",
            syntax_id: "ruby",
            default_code: r#"# Ruby Playground
numbers = [1, 2, 3, 4, 5]

squares = numbers.map { |n| n ** 2 }
puts "Original numbers: #{numbers.inspect}"
puts "Squared numbers: #{squares.inspect}"
puts "Sum of numbers: #{numbers.sum}""#,
            icon_path: "/ruby.png",
            version: "3.0.1",
            description: "Dynamic object-oriented language",
        },
        LanguageConfig {
            id: "swift",
            label: "Swift",
            syntax_id: "swift",
            default_code: r#"// Swift Playground
let numbers = [1, 2, 3, 4, 5]

let squares = numbers.map { $0 * $0 }
print("Original numbers: \(numbers)")
print("Squared numbers: \(squares)")
print("Sum of numbers: \(numbers.reduce(0, +))")"#,
            icon_path: "/swift.png",
            version: "5.3.3",
            description: "Apple platform development",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let registry = LanguageRegistry::builtin();
        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(
            ids,
            vec![
                "javascript",
                "typescript",
                "python",
                "java",
                "go",
                "rust",
                "cpp",
                "csharp",
                "ruby",
                "swift",
            ]
        );
    }

    #[test]
    fn test_builtin_default_is_first() {
        let registry = LanguageRegistry::builtin();
        assert_eq!(registry.default_entry().id, "javascript");
    }

    #[test]
    fn test_builtin_ids_unique() {
        // Going through the checked constructor catches duplicates.
        assert!(LanguageRegistry::new(builtin_languages()).is_ok());
    }

    #[test]
    fn test_builtin_entries_complete() {
        for lang in LanguageRegistry::builtin().list() {
            assert!(!lang.default_code.is_empty(), "{} has no starter code", lang.id);
            assert!(!lang.version.is_empty(), "{} has no version pin", lang.id);
            assert_eq!(lang.icon_path, format!("/{}.png", lang.id));
        }
    }

    #[test]
    fn test_get_unknown_language() {
        let registry = LanguageRegistry::builtin();
        let err = registry.get("cobol").unwrap_err();
        assert_eq!(err.to_string(), "unknown language: cobol");
    }
}

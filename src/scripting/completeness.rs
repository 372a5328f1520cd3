//! Lexical check for console input that is still open at end of text
//!
//! Brackets, back-tick strings (with `${}` interpolation), `\` continued
//! string literals and nested block comments keep a unit open. A stray
//! closer or an unterminated single-line string does not: those are syntax
//! errors the evaluation should report.

enum Frame {
    Delimiter(char),
    Backtick,
    Interpolation,
}

/// True if `source` ends inside an unfinished construct
pub fn is_open(source: &str) -> bool {
    let mut stack: Vec<Frame> = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if matches!(stack.last(), Some(Frame::Backtick)) {
            match c {
                '`' => {
                    stack.pop();
                }
                '$' if chars.peek() == Some(&'{') => {
                    chars.next();
                    stack.push(Frame::Interpolation);
                }
                _ => {}
            }
            continue;
        }

        match c {
            '/' if chars.peek() == Some(&'/') => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut depth = 1;
                while depth > 0 {
                    match chars.next() {
                        Some('/') if chars.peek() == Some(&'*') => {
                            chars.next();
                            depth += 1;
                        }
                        Some('*') if chars.peek() == Some(&'/') => {
                            chars.next();
                            depth -= 1;
                        }
                        Some(_) => {}
                        None => return true,
                    }
                }
            }
            '"' | '\'' => {
                let quote = c;
                loop {
                    match chars.next() {
                        // `\` right before the end continues the literal
                        Some('\\') => {
                            if chars.next().is_none() {
                                return true;
                            }
                        }
                        Some(c) if c == quote || c == '\n' => break,
                        Some(_) => {}
                        None => break,
                    }
                }
            }
            '`' => stack.push(Frame::Backtick),
            '(' => stack.push(Frame::Delimiter(')')),
            '[' => stack.push(Frame::Delimiter(']')),
            '{' => stack.push(Frame::Delimiter('}')),
            ')' | ']' | '}' => match stack.last() {
                Some(Frame::Delimiter(close)) if *close == c => {
                    stack.pop();
                }
                Some(Frame::Interpolation) if c == '}' => {
                    stack.pop();
                }
                _ => return false,
            },
            _ => {}
        }
    }

    !stack.is_empty()
}

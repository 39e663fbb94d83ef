//! Four-function calculator with immediate (left-to-right) chaining

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// Parse a button action (`+`, `-`, `*`, `/`)
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Op::Add),
            "-" => Some(Op::Sub),
            "*" => Some(Op::Mul),
            "/" => Some(Op::Div),
            _ => None,
        }
    }

    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div => lhs / rhs,
        }
    }
}

/// A key on the calculator pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    Decimal,
    Op(Op),
    Equals,
    Clear,
    Delete,
}

impl Key {
    /// Map a button's `data-num` / `data-action` value to a key
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "." => Some(Key::Decimal),
            "=" => Some(Key::Equals),
            "clear" => Some(Key::Clear),
            "delete" => Some(Key::Delete),
            _ => {
                if let Some(op) = Op::from_symbol(value) {
                    return Some(Key::Op(op));
                }
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Some(Key::Digit(c)),
                    _ => None,
                }
            }
        }
    }
}

/// Format a result the way the display shows numbers
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        // Avoid "-0"
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculator {
    display: String,
    previous: Option<f64>,
    operator: Option<Op>,
    waiting_for_operand: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            previous: None,
            operator: None,
            waiting_for_operand: false,
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    fn value(&self) -> f64 {
        self.display.parse().unwrap_or(f64::NAN)
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => self.input_digit(d),
            Key::Decimal => self.input_decimal(),
            Key::Op(op) => self.apply_operator(op),
            Key::Equals => self.equals(),
            Key::Clear => self.clear(),
            Key::Delete => self.delete(),
        }
    }

    pub fn input_digit(&mut self, digit: char) {
        if self.waiting_for_operand || self.display == "0" {
            self.display = digit.to_string();
            self.waiting_for_operand = false;
        } else {
            self.display.push(digit);
        }
    }

    pub fn input_decimal(&mut self) {
        if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    pub fn apply_operator(&mut self, op: Op) {
        // Pressing operators back to back just swaps the pending one
        if self.operator.is_some() && self.waiting_for_operand {
            self.operator = Some(op);
            return;
        }
        self.evaluate_pending();
        self.waiting_for_operand = true;
        self.operator = Some(op);
    }

    pub fn equals(&mut self) {
        if !self.waiting_for_operand {
            self.evaluate_pending();
        }
        self.operator = None;
        self.previous = None;
        self.waiting_for_operand = true;
    }

    /// Fold the display into `previous` using the pending operator
    fn evaluate_pending(&mut self) {
        let value = self.value();
        match (self.previous, self.operator) {
            (Some(prev), Some(op)) => {
                let result = op.apply(prev, value);
                self.display = format_number(result);
                self.previous = Some(result);
            }
            _ => self.previous = Some(value),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn delete(&mut self) {
        if self.display.chars().count() > 1 {
            self.display.pop();
        } else {
            self.display = "0".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(keys: &str) -> Calculator {
        let mut calc = Calculator::new();
        for c in keys.chars() {
            let key = Key::parse(&c.to_string()).expect("valid key");
            calc.press(key);
        }
        calc
    }

    #[test]
    fn test_digits_replace_leading_zero() {
        assert_eq!(run("007").display(), "7");
        assert_eq!(run("12.5").display(), "12.5");
        assert_eq!(run("1.2.3").display(), "1.23");
    }

    #[test]
    fn test_simple_ops() {
        assert_eq!(run("2+3=").display(), "5");
        assert_eq!(run("9-12=").display(), "-3");
        assert_eq!(run("6*7=").display(), "42");
        assert_eq!(run("7/2=").display(), "3.5");
    }

    #[test]
    fn test_chaining_is_left_to_right() {
        // 2 + 3 shows 5 when * is pressed, then 5 * 4
        let calc = run("2+3*");
        assert_eq!(calc.display(), "5");
        assert_eq!(run("2+3*4=").display(), "20");
    }

    #[test]
    fn test_operator_swap() {
        assert_eq!(run("8+-2=").display(), "6");
    }

    #[test]
    fn test_equals_then_new_number() {
        let mut calc = run("2+3=");
        calc.press(Key::Digit('9'));
        assert_eq!(calc.display(), "9");
        calc.press(Key::Equals);
        assert_eq!(calc.display(), "9");
    }

    #[test]
    fn test_operator_then_equals_keeps_display() {
        assert_eq!(run("5+=").display(), "5");
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(run("1/0=").display(), "Infinity");
        assert_eq!(run("0/0=").display(), "NaN");
    }

    #[test]
    fn test_float_display() {
        assert_eq!(run("0.1+0.2=").display(), "0.30000000000000004");
        assert_eq!(run("3-3=").display(), "0");
    }

    #[test]
    fn test_clear_and_delete() {
        let mut calc = run("123");
        calc.press(Key::Delete);
        assert_eq!(calc.display(), "12");
        calc.press(Key::Delete);
        calc.press(Key::Delete);
        assert_eq!(calc.display(), "0");

        let mut calc = run("4+5");
        calc.press(Key::Clear);
        assert_eq!(calc, Calculator::new());
    }

    #[test]
    fn test_key_parse() {
        assert_eq!(Key::parse("clear"), Some(Key::Clear));
        assert_eq!(Key::parse("/"), Some(Key::Op(Op::Div)));
        assert_eq!(Key::parse("12"), None);
        assert_eq!(Key::parse("x"), None);
    }
}

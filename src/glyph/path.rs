use std::sync::LazyLock;

use regex::Regex;

const CURVE_STEPS: usize = 8;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[MmLlHhVvCcSsZz]|[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?")
        .expect("path token regex is valid")
});

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f32),
}

fn tokenize(d: &str) -> Vec<Token> {
    TOKEN
        .find_iter(d)
        .filter_map(|m| {
            let text = m.as_str();
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => Some(Token::Command(c)),
                _ => text.parse::<f32>().ok().map(Token::Number),
            }
        })
        .collect()
}

fn cubic(p0: (f32, f32), c1: (f32, f32), c2: (f32, f32), p3: (f32, f32), out: &mut Vec<(f32, f32)>) {
    for step in 1..=CURVE_STEPS {
        let t = step as f32 / CURVE_STEPS as f32;
        let u = 1.0 - t;
        let a = u * u * u;
        let b = 3.0 * u * u * t;
        let c = 3.0 * u * t * t;
        let d = t * t * t;
        out.push((
            a * p0.0 + b * c1.0 + c * c2.0 + d * p3.0,
            a * p0.1 + b * c1.1 + c * c2.1 + d * p3.1,
        ));
    }
}

/// Flattens an SVG path `d` attribute into polylines. Curves are sampled at fixed
/// steps; unsupported commands end the parse at that point.
pub fn flatten_path(d: &str) -> Vec<Vec<(f32, f32)>> {
    let tokens = tokenize(d);
    let mut lines: Vec<Vec<(f32, f32)>> = Vec::new();
    let mut line: Vec<(f32, f32)> = Vec::new();

    let mut pos = (0.0f32, 0.0f32);
    let mut start = pos;
    let mut last_control: Option<(f32, f32)> = None;
    let mut command = None;
    let mut i = 0;

    let take = |i: &mut usize, n: usize| -> Option<Vec<f32>> {
        let nums: Vec<f32> = tokens[*i..]
            .iter()
            .take(n)
            .map_while(|t| match t {
                Token::Number(v) => Some(*v),
                Token::Command(_) => None,
            })
            .collect();
        if nums.len() == n {
            *i += n;
            Some(nums)
        } else {
            None
        }
    };

    while i < tokens.len() {
        if let Token::Command(c) = tokens[i] {
            command = Some(c);
            i += 1;
            if c == 'Z' || c == 'z' {
                line.push(start);
                pos = start;
                last_control = None;
                command = None;
            }
            continue;
        }

        let Some(c) = command else { break };
        let relative = c.is_ascii_lowercase();
        let origin = if relative { pos } else { (0.0, 0.0) };

        match c.to_ascii_uppercase() {
            'M' => {
                let Some(n) = take(&mut i, 2) else { break };
                if line.len() > 1 {
                    lines.push(std::mem::take(&mut line));
                } else {
                    line.clear();
                }
                pos = (origin.0 + n[0], origin.1 + n[1]);
                start = pos;
                line.push(pos);
                last_control = None;
                // Further pairs after a moveto are implicit linetos.
                command = Some(if relative { 'l' } else { 'L' });
            }
            'L' => {
                let Some(n) = take(&mut i, 2) else { break };
                pos = (origin.0 + n[0], origin.1 + n[1]);
                line.push(pos);
                last_control = None;
            }
            'H' => {
                let Some(n) = take(&mut i, 1) else { break };
                pos = (origin.0 + n[0], pos.1);
                line.push(pos);
                last_control = None;
            }
            'V' => {
                let Some(n) = take(&mut i, 1) else { break };
                pos = (pos.0, origin.1 + n[0]);
                line.push(pos);
                last_control = None;
            }
            'C' => {
                let Some(n) = take(&mut i, 6) else { break };
                let c1 = (origin.0 + n[0], origin.1 + n[1]);
                let c2 = (origin.0 + n[2], origin.1 + n[3]);
                let end = (origin.0 + n[4], origin.1 + n[5]);
                cubic(pos, c1, c2, end, &mut line);
                last_control = Some(c2);
                pos = end;
            }
            'S' => {
                let Some(n) = take(&mut i, 4) else { break };
                let c1 = match last_control {
                    Some(prev) => (2.0 * pos.0 - prev.0, 2.0 * pos.1 - prev.1),
                    None => pos,
                };
                let c2 = (origin.0 + n[0], origin.1 + n[1]);
                let end = (origin.0 + n[2], origin.1 + n[3]);
                cubic(pos, c1, c2, end, &mut line);
                last_control = Some(c2);
                pos = end;
            }
            other => {
                tracing::debug!("Unsupported path command {:?}", other);
                break;
            }
        }
    }

    if line.len() > 1 {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_and_implicit_lineto() {
        let lines = flatten_path("M10,10 20,10 L20,20 h-10 z");
        assert_eq!(lines, vec![vec![(10.0, 10.0), (20.0, 10.0), (20.0, 20.0), (10.0, 20.0), (10.0, 10.0)]]);
    }

    #[test]
    fn test_compact_kanjivg_numbers() {
        // KanjiVG packs numbers without separators: "0.5.5" is 0.5 then .5
        let lines = flatten_path("M11,54.25c3.19,0.62,6.25,0.5.5-1.2");
        assert_eq!(lines.len(), 1);
        let stroke = &lines[0];
        assert_eq!(stroke.len(), 1 + CURVE_STEPS);
        let end = stroke[stroke.len() - 1];
        assert!((end.0 - 11.5).abs() < 1e-4);
        assert!((end.1 - 53.05).abs() < 1e-4);
    }

    #[test]
    fn test_smooth_curve_reflects_control() {
        let lines = flatten_path("M0,0 C0,10 10,10 10,0 S20,-10 20,0");
        assert_eq!(lines[0].len(), 1 + 2 * CURVE_STEPS);
        let end = lines[0][lines[0].len() - 1];
        assert!((end.0 - 20.0).abs() < 1e-4);
        assert!(end.1.abs() < 1e-4);
    }

    #[test]
    fn test_garbage_yields_nothing() {
        assert!(flatten_path("").is_empty());
        assert!(flatten_path("hello").is_empty());
    }
}

//! Deterministic decoding shared by every sequence-to-sequence backend.
//!
//! The loop only sees logits, so the model side stays a closure that turns
//! the decoder sequence so far into next-token scores.

use brief_core::{Error, LengthBounds, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    pub decoder_start_token_id: u32,
    pub eos_token_id: u32,
    /// Size of n-grams that may appear only once in the output. 0 disables.
    pub no_repeat_ngram_size: usize,
}

/// Greedy decoding with a minimum and maximum length.
///
/// `step` receives the decoder sequence (starting with the start token) and
/// returns the logits for the next position. EOS is masked until
/// `bounds.min_length()` tokens exist and generation stops after
/// `bounds.max_length()` tokens. The returned ids exclude the start and EOS
/// tokens.
pub fn greedy_decode<F>(config: &GenerationConfig, bounds: LengthBounds, mut step: F) -> Result<Vec<u32>>
where
    F: FnMut(&[u32]) -> Result<Vec<f32>>,
{
    let mut sequence = vec![config.decoder_start_token_id];

    while sequence.len() - 1 < bounds.max_length() {
        let generated = sequence.len() - 1;
        let mut logits = step(&sequence)?;

        if generated < bounds.min_length() {
            mask_token(&mut logits, config.eos_token_id);
        }
        ban_repeated_ngrams(&mut logits, &sequence[1..], config.no_repeat_ngram_size);

        let next = argmax(&logits)
            .ok_or_else(|| Error::Inference("model returned empty logits".to_string()))?;
        if next == config.eos_token_id {
            break;
        }
        sequence.push(next);
    }

    sequence.remove(0);
    Ok(sequence)
}

fn mask_token(logits: &mut [f32], token: u32) {
    if let Some(score) = logits.get_mut(token as usize) {
        *score = f32::NEG_INFINITY;
    }
}

/// Masks every token that would close an n-gram already present in `tokens`.
pub fn ban_repeated_ngrams(logits: &mut [f32], tokens: &[u32], ngram_size: usize) {
    if ngram_size == 0 || tokens.len() + 1 < ngram_size {
        return;
    }
    let prefix = &tokens[tokens.len() + 1 - ngram_size..];
    for window in tokens.windows(ngram_size) {
        if &window[..ngram_size - 1] == prefix {
            mask_token(logits, window[ngram_size - 1]);
        }
    }
}

/// Index of the highest score; ties resolve to the lowest index.
pub fn argmax(logits: &[f32]) -> Option<u32> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &score) in logits.iter().enumerate() {
        match best {
            Some((_, top)) if score <= top => {}
            Some(_) if score.is_nan() => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: u32 = 0;
    const EOS: u32 = 1;

    fn config(no_repeat_ngram_size: usize) -> GenerationConfig {
        GenerationConfig {
            decoder_start_token_id: START,
            eos_token_id: EOS,
            no_repeat_ngram_size,
        }
    }

    /// Scores token `preferred[step]` highest, then EOS, then everything else.
    fn scripted(preferred: Vec<u32>) -> impl FnMut(&[u32]) -> Result<Vec<f32>> {
        move |sequence: &[u32]| {
            let mut logits = vec![0.0; 10];
            logits[EOS as usize] = 1.0;
            if let Some(&token) = preferred.get(sequence.len() - 1) {
                logits[token as usize] = 5.0;
            }
            Ok(logits)
        }
    }

    #[test]
    fn test_stops_on_eos() {
        let tokens = greedy_decode(&config(0), LengthBounds::new(0, 50), scripted(vec![4, 5, 6])).unwrap();
        assert_eq!(tokens, vec![4, 5, 6]);
    }

    #[test]
    fn test_min_length_masks_eos() {
        // nothing scripted, so EOS would win on the first step
        let tokens = greedy_decode(&config(0), LengthBounds::new(3, 50), scripted(vec![])).unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(!tokens.contains(&EOS));
    }

    #[test]
    fn test_max_length_caps_output() {
        let tokens = greedy_decode(&config(0), LengthBounds::new(0, 2), scripted(vec![4, 5, 6, 7])).unwrap();
        assert_eq!(tokens, vec![4, 5]);
    }

    #[test]
    fn test_output_length_within_bounds() {
        let bounds = LengthBounds::new(4, 8);
        for script in [vec![], vec![2, 3], vec![2, 3, 4, 5, 6], vec![2; 20]] {
            let tokens = greedy_decode(&config(0), bounds, scripted(script)).unwrap();
            assert!(tokens.len() >= bounds.min_length());
            assert!(tokens.len() <= bounds.max_length());
        }
    }

    #[test]
    fn test_step_sees_start_token_first() {
        let mut seen = Vec::new();
        greedy_decode(&config(0), LengthBounds::new(0, 3), |sequence: &[u32]| {
            seen.push(sequence.to_vec());
            Ok(vec![0.0, 0.0, 1.0])
        })
        .unwrap();
        assert_eq!(seen, vec![vec![START], vec![START, 2], vec![START, 2, 2]]);
    }

    #[test]
    fn test_no_repeat_ngram() {
        let fixed = |_: &[u32]| Ok::<_, Error>(vec![-1.0, 0.0, -1.0, -1.0, 10.0, 5.0, 1.0]);
        let tokens = greedy_decode(&config(2), LengthBounds::new(0, 5), fixed).unwrap();
        assert_eq!(tokens, vec![4, 4, 5, 4, 6]);
    }

    #[test]
    fn test_decoding_is_deterministic() {
        let bounds = LengthBounds::new(2, 10);
        let first = greedy_decode(&config(3), bounds, scripted(vec![3, 4, 3, 4, 3, 4])).unwrap();
        let second = greedy_decode(&config(3), bounds, scripted(vec![3, 4, 3, 4, 3, 4])).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_step_error_propagates() {
        let result = greedy_decode(&config(0), LengthBounds::new(0, 5), |_: &[u32]| {
            Err(Error::Inference("out of memory".to_string()))
        });
        assert!(matches!(result, Err(Error::Inference(msg)) if msg == "out of memory"));
    }

    #[test]
    fn test_empty_logits_is_an_error() {
        let result = greedy_decode(&config(0), LengthBounds::new(0, 5), |_: &[u32]| Ok(vec![]));
        assert!(result.is_err());
    }

    #[test]
    fn test_argmax_prefers_lowest_index_on_tie() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), Some(1));
        assert_eq!(argmax(&[f32::NEG_INFINITY, f32::NEG_INFINITY]), Some(0));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_ban_repeated_trigram() {
        let mut logits = vec![0.0; 8];
        ban_repeated_ngrams(&mut logits, &[2, 3, 4, 2, 3], 3);
        assert_eq!(logits[4], f32::NEG_INFINITY);
        assert_eq!(logits.iter().filter(|s| s.is_infinite()).count(), 1);
    }
}

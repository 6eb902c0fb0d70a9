use anyhow::{Context, Result, bail};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse CLI seed tokens: decimal (`1337`, `-5`) or hex (`0xC0FFEE`).
pub fn parse_seeds(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds = Vec::with_capacity(tokens.len());
    for token in tokens {
        let seed = if let Some(hex) = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            u64::from_str_radix(&hex.replace('_', ""), 16)
                .with_context(|| format!("invalid hex seed '{token}'"))?
        } else if let Ok(value) = token.parse::<i64>() {
            value.unsigned_abs()
        } else if let Ok(value) = token.parse::<u64>() {
            value
        } else {
            bail!("unrecognized seed '{token}'");
        };
        seeds.push(seed);
    }
    if seeds.is_empty() {
        bail!("no seeds provided");
    }
    Ok(seeds)
}

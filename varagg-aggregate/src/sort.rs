use varagg_core::errors::DumpError;
use varagg_core::models::{AlignmentRecord, DumpRecord};

/// Fields a record must expose to participate in the multi-key sort.
pub trait VariantKeyed {
    fn sample_id(&self) -> &str;
    fn chromosome(&self) -> &str;
    fn position(&self) -> u64;
    fn reference_allele(&self) -> &str;
    fn alternate_allele(&self) -> &str;
}

impl VariantKeyed for DumpRecord {
    fn sample_id(&self) -> &str {
        &self.sample_id
    }
    fn chromosome(&self) -> &str {
        &self.chromosome
    }
    fn position(&self) -> u64 {
        self.position
    }
    fn reference_allele(&self) -> &str {
        &self.reference_allele
    }
    fn alternate_allele(&self) -> &str {
        &self.alternate_allele
    }
}

impl VariantKeyed for AlignmentRecord {
    fn sample_id(&self) -> &str {
        &self.sample_id
    }
    fn chromosome(&self) -> &str {
        &self.chromosome
    }
    fn position(&self) -> u64 {
        self.position
    }
    fn reference_allele(&self) -> &str {
        &self.reference_allele
    }
    fn alternate_allele(&self) -> &str {
        &self.alternate_allele
    }
}

/// Numeric sort key for a chromosome name: `chrX` is 23, `chr<digits>`
/// is the digits. Anything else is a fatal input-format error, never a
/// silent coercion.
pub fn chr_sort_key(chromosome: &str) -> Result<u32, DumpError> {
    if chromosome == "chrX" {
        return Ok(23);
    }
    let digits = chromosome
        .strip_prefix("chr")
        .ok_or_else(|| DumpError::MalformedChromosome(chromosome.to_string()))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DumpError::MalformedChromosome(chromosome.to_string()));
    }
    digits
        .parse::<u32>()
        .map_err(|_| DumpError::MalformedChromosome(chromosome.to_string()))
}

/// Sample ids compare with the literal `-CG001` infix removed.
fn sample_sort_key(sample_id: &str) -> String {
    sample_id.replace("-CG001", "")
}

/// Stable total order over dump records:
/// chromosome (numeric) and position, then reference and alternate
/// alleles, then the sample id with `-CG001` removed.
///
/// Chromosome keys are validated up front, so a malformed chromosome
/// aborts before any reordering happens.
pub fn sort_records<T: VariantKeyed>(records: Vec<T>) -> Result<Vec<T>, DumpError> {
    let mut keyed = Vec::with_capacity(records.len());
    for record in records {
        let chrom = chr_sort_key(record.chromosome())?;
        let sample = sample_sort_key(record.sample_id());
        keyed.push((chrom, sample, record));
    }

    keyed.sort_by(|(chrom_a, sample_a, a), (chrom_b, sample_b, b)| {
        (
            chrom_a,
            a.position(),
            a.reference_allele(),
            a.alternate_allele(),
            sample_a.as_str(),
        )
            .cmp(&(
                chrom_b,
                b.position(),
                b.reference_allele(),
                b.alternate_allele(),
                sample_b.as_str(),
            ))
    });

    Ok(keyed.into_iter().map(|(_, _, record)| record).collect())
}

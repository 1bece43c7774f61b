/// Splits `address` into its page number and the offset inside that page.
///
/// Bounds are the caller's problem: this never fails.
pub fn translate(address: usize, page_size: usize) -> (usize, usize) {
    let page_number = address / page_size;
    let page_offset = address % page_size;

    (page_number, page_offset)
}

/// Number of pages needed to hold `size_bytes`, rounding up.
pub fn page_count(size_bytes: usize, page_size: usize) -> usize {
    size_bytes.div_ceil(page_size)
}

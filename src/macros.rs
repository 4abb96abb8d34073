macro_rules! bitpos {
    ($idx:expr) => {{
        let idx = $idx;
        (idx >> 6, idx & 63)
    }};
}

pub(crate) use bitpos;

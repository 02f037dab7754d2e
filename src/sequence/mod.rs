pub(crate) mod chainer;
pub(crate) mod filter;

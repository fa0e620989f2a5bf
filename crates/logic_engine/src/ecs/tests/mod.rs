//! Cross-module scenarios driving the full frame sequence

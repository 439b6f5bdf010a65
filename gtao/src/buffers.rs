mod double_buffered;
mod mapped_uniform_buffer;
mod texture;

pub use self::double_buffered::*;
pub use self::mapped_uniform_buffer::*;
pub use self::texture::*;

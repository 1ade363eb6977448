//! Contract for the service that turns preview images into GPU textures.

use egui::ColorImage;

/// Creates and updates textures from pixel buffers.
///
/// The editor core only ever holds the opaque [`Handle`](Self::Handle). A
/// handle owns its texture: dropping it releases the texture.
pub trait TextureService {
    /// Owned reference to one texture.
    type Handle;

    /// Creates a new texture holding `image`.
    ///
    /// `name` identifies the texture for debugging.
    fn create(&mut self, name: &str, image: ColorImage) -> Result<Self::Handle, String>;

    /// Replaces the contents of an existing texture. `image` has the same
    /// size the texture was created with.
    fn update(&mut self, handle: &mut Self::Handle, image: ColorImage) -> Result<(), String>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory texture service used by the controller tests.

    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Shared counters observed by the tests.
    #[derive(Debug, Default)]
    pub struct TextureLog {
        pub created: Cell<usize>,
        pub updated: Cell<usize>,
        pub released: Cell<usize>,
        pub last_size: Cell<Option<[usize; 2]>>,
        pub names: RefCell<Vec<String>>,
    }

    impl TextureLog {
        pub fn live(&self) -> usize {
            self.created.get() - self.released.get()
        }
    }

    /// A texture handle that records its release.
    #[derive(Debug)]
    pub struct MockHandle {
        pub id: usize,
        pub size: [usize; 2],
        log: Rc<TextureLog>,
    }

    impl Drop for MockHandle {
        fn drop(&mut self) {
            self.log.released.set(self.log.released.get() + 1);
        }
    }

    /// Texture service that keeps nothing but counters, and can be told to
    /// fail.
    pub struct MockTextures {
        pub log: Rc<TextureLog>,
        pub fail_create: bool,
        pub fail_update: bool,
    }

    impl MockTextures {
        pub fn new() -> Self {
            Self {
                log: Rc::new(TextureLog::default()),
                fail_create: false,
                fail_update: false,
            }
        }
    }

    impl TextureService for MockTextures {
        type Handle = MockHandle;

        fn create(&mut self, name: &str, image: ColorImage) -> Result<MockHandle, String> {
            if self.fail_create {
                return Err("no texture memory".to_string());
            }
            let id = self.log.created.get();
            self.log.created.set(id + 1);
            self.log.last_size.set(Some(image.size));
            self.log.names.borrow_mut().push(name.to_string());
            Ok(MockHandle {
                id,
                size: image.size,
                log: Rc::clone(&self.log),
            })
        }

        fn update(&mut self, handle: &mut MockHandle, image: ColorImage) -> Result<(), String> {
            if self.fail_update {
                return Err("device lost".to_string());
            }
            assert_eq!(handle.size, image.size, "update must keep the texture size");
            self.log.updated.set(self.log.updated.get() + 1);
            self.log.last_size.set(Some(image.size));
            Ok(())
        }
    }
}

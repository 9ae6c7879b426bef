mod collection;

#[ctor::ctor]
fn init() {
    colog::init();
}

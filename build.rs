fn main() {
    slint_build::compile("ui/app.slint").expect("Slint 编译失败");
}

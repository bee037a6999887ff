fn main() {
    for p in ["hive*", "(hive*)", "(hive* AND x)", "hive* AND x"] {
        let e = termsieve::parse(p).unwrap();
        println!("{:?} -> {:?}", p, e.pretty());
    }
}

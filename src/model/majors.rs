use std::borrow::Cow;

#[derive(Debug, Clone, Copy)]
pub struct MajorDef {
    pub name: &'static str,
    pub description: &'static str,
}

const BUILTIN_MAJORS: &[MajorDef] = &[
    MajorDef {
        name: "Teknik",
        description: "Jurusan Teknik mempelajari penerapan matematika dan ilmu fisika untuk merancang, membangun, dan memelihara sistem, mesin, maupun infrastruktur. Nilai tinggi pada Matematika dan Fisika menunjukkan kemampuan analitis dan pemecahan masalah yang kuat. Lulusan dapat berkarier sebagai insinyur sipil, mesin, elektro, industri, atau bidang rekayasa lainnya.",
    },
    MajorDef {
        name: "Kedokteran",
        description: "Jurusan Kedokteran mempelajari tubuh manusia, penyakit, serta cara pencegahan dan pengobatannya. Nilai tinggi pada Biologi dan Kimia menjadi dasar penting untuk memahami anatomi, fisiologi, dan farmakologi. Lulusan dapat menjadi dokter umum, dokter spesialis, peneliti medis, atau tenaga kesehatan masyarakat.",
    },
    MajorDef {
        name: "Ilmu Komputer",
        description: "Jurusan Ilmu Komputer mempelajari algoritma, pemrograman, struktur data, dan rekayasa perangkat lunak. Kemampuan Matematika yang baik membantu dalam berpikir logis dan abstrak. Lulusan dapat berkarier sebagai pengembang perangkat lunak, analis data, atau spesialis keamanan siber.",
    },
    MajorDef {
        name: "Ekonomi",
        description: "Jurusan Ekonomi mempelajari bagaimana individu, perusahaan, dan negara mengelola sumber daya yang terbatas. Nilai baik pada Ekonomi dan Matematika mendukung pemahaman analisis pasar, keuangan, dan kebijakan. Lulusan dapat bekerja di perbankan, konsultan bisnis, pemerintahan, atau menjadi wirausahawan.",
    },
    MajorDef {
        name: "Hukum",
        description: "Jurusan Hukum mempelajari sistem peraturan, keadilan, serta hak dan kewajiban warga negara. Nilai baik pada PPKN, Sejarah, dan Bahasa Indonesia menunjukkan kemampuan argumentasi dan pemahaman kewarganegaraan. Lulusan dapat menjadi advokat, jaksa, hakim, notaris, atau konsultan hukum.",
    },
    MajorDef {
        name: "Psikologi",
        description: "Jurusan Psikologi mempelajari perilaku dan proses mental manusia. Nilai baik pada Sosiologi dan Biologi membantu memahami interaksi sosial dan dasar biologis perilaku. Lulusan dapat berkarier sebagai psikolog, konselor, praktisi sumber daya manusia, atau peneliti.",
    },
    MajorDef {
        name: "Pendidikan",
        description: "Jurusan Pendidikan mempersiapkan tenaga pengajar dan pengembang kurikulum yang profesional. Nilai yang seimbang di berbagai mata pelajaran menunjukkan wawasan luas yang dibutuhkan seorang pendidik. Lulusan dapat menjadi guru, dosen, pengembang materi ajar, atau konsultan pendidikan.",
    },
    MajorDef {
        name: "Sastra",
        description: "Jurusan Sastra mempelajari bahasa, karya sastra, dan budaya. Nilai tinggi pada Bahasa Indonesia dan Bahasa Inggris menunjukkan kemampuan berbahasa dan apresiasi teks yang baik. Lulusan dapat berkarier sebagai penulis, penerjemah, editor, jurnalis, atau peneliti bahasa.",
    },
    MajorDef {
        name: "Seni",
        description: "Jurusan Seni mengembangkan kreativitas melalui seni rupa, desain, musik, maupun seni pertunjukan. Nilai tinggi pada Seni Budaya menunjukkan kepekaan estetika dan ekspresi kreatif. Lulusan dapat menjadi desainer, seniman, kurator, atau pelaku industri kreatif.",
    },
    MajorDef {
        name: "Pertanian",
        description: "Jurusan Pertanian mempelajari budidaya tanaman, pengelolaan lahan, dan teknologi pangan. Nilai baik pada Biologi dan Kimia mendukung pemahaman tentang tanah, tumbuhan, dan proses produksi pangan. Lulusan dapat bekerja di agribisnis, penyuluhan pertanian, atau riset ketahanan pangan.",
    },
    MajorDef {
        name: "Ilmu Keolahragaan",
        description: "Jurusan Ilmu Keolahragaan mempelajari kepelatihan, kebugaran, dan ilmu gerak manusia. Nilai tinggi pada Penjas menunjukkan minat dan kemampuan di bidang olahraga. Lulusan dapat menjadi pelatih, instruktur kebugaran, guru olahraga, atau analis performa atlet.",
    },
    MajorDef {
        name: "Studi Islam",
        description: "Jurusan Studi Islam mempelajari ajaran, sejarah, dan pemikiran Islam secara mendalam. Nilai tinggi pada Agama Islam dan Sejarah menunjukkan ketertarikan pada kajian keagamaan. Lulusan dapat berkarier sebagai pendidik agama, peneliti, penyuluh, atau bekerja di lembaga keagamaan dan sosial.",
    },
];

pub fn builtin_majors() -> &'static [MajorDef] {
    BUILTIN_MAJORS
}

pub fn lookup_description(major: &str) -> Option<&'static str> {
    builtin_majors()
        .iter()
        .find(|m| m.name == major)
        .map(|m| m.description)
}

/// Hand-written text when the table knows the major, templated text otherwise.
pub fn describe(major: &str) -> Cow<'static, str> {
    match lookup_description(major) {
        Some(text) => Cow::Borrowed(text),
        None => Cow::Owned(fallback_description(major)),
    }
}

pub fn fallback_description(major: &str) -> String {
    format!(
        "Jurusan {major} direkomendasikan berdasarkan pola nilai mata pelajaran Anda. \
         Pelajari kurikulum, prospek karier, dan kampus yang menawarkan jurusan {major} \
         untuk memastikan kesesuaiannya dengan minat dan tujuan Anda."
    )
}

/// Labels the decoder can produce that have no hand-written description.
pub fn missing_descriptions<'a, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        if lookup_description(label).is_none() && !out.iter().any(|l| l == label) {
            out.push(label.to_string());
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/majors.rs"]
mod tests;
